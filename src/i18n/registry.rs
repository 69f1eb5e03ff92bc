//! Language registry: single source of truth for supported languages.
//!
//! The registry maps exact locale keys to supported identities and remembers
//! the order in which identities were registered. The first identity ever
//! registered becomes the default and stays the default until
//! [`LanguageRegistry::clear_register`] is called.
//!
//! There is no global instance. Build one at startup with
//! [`LanguageRegistry::with_builtins`] and pass it by reference to whoever
//! needs to resolve languages.

use crate::error::{LanguageError, Result};
use crate::i18n::{LanguageIdentity, LocaleKey};
use std::collections::HashMap;
use tracing::debug;

/// Catalog of supported languages and locale aliases.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    /// Exact locale key -> identity (many-to-one)
    locale_to_identity: HashMap<LocaleKey, LanguageIdentity>,

    /// Registered identities in first-registration order, without duplicates
    registered: Vec<LanguageIdentity>,

    /// First identity registered since construction or the last reset
    default: Option<LanguageIdentity>,
}

impl LanguageRegistry {
    /// Create an empty registry with no default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with [`builtin_languages`].
    ///
    /// Simplified Chinese is registered first and is therefore the default.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (locale, identity) in builtin_languages() {
            registry.register(locale, identity);
        }
        registry
    }

    /// Register `identity` as the language for `locale`.
    ///
    /// Overwrites any previous mapping for the same locale. The identity is
    /// appended to the registered list if it is not already there. The very
    /// first registration since construction (or since the last
    /// [`clear_register`](Self::clear_register)) fixes the default; later calls
    /// never change it.
    pub fn register(&mut self, locale: LocaleKey, identity: LanguageIdentity) {
        if !self.registered.contains(&identity) {
            self.registered.push(identity.clone());
        }

        if self.default.is_none() {
            debug!(language = %identity, "Default language fixed");
            self.default = Some(identity.clone());
        }

        debug!(locale = %locale, language = %identity, "Registered language");
        self.locale_to_identity.insert(locale, identity);
    }

    /// Get the default language.
    ///
    /// # Errors
    /// Returns `IllegalState` if nothing has been registered.
    pub fn default_language(&self) -> Result<&LanguageIdentity> {
        self.default.as_ref().ok_or_else(|| {
            LanguageError::IllegalState(
                "no language registered; call register() before querying the default"
                    .to_string(),
            )
        })
    }

    /// Get the language registered for exactly `locale`, or the default.
    ///
    /// No partial matching happens here: `zh-SG` does not fall back to `zh`.
    ///
    /// # Errors
    /// Returns `IllegalState` if the locale is unknown and nothing has been
    /// registered.
    pub fn language_for(&self, locale: &LocaleKey) -> Result<&LanguageIdentity> {
        match self.locale_to_identity.get(locale) {
            Some(identity) => Ok(identity),
            None => {
                debug!(locale = %locale, "Locale not registered, using default");
                self.default_language()
            }
        }
    }

    /// The language registered for exactly `locale`, without falling back.
    pub fn lookup(&self, locale: &LocaleKey) -> Option<&LanguageIdentity> {
        self.locale_to_identity.get(locale)
    }

    /// Check whether `identity` is registered (structural equality).
    pub fn contains_language(&self, identity: &LanguageIdentity) -> bool {
        self.registered.contains(identity)
    }

    /// All registered languages in registration order.
    pub fn all_languages(&self) -> &[LanguageIdentity] {
        &self.registered
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Forget every mapping, every language and the default.
    pub fn clear_register(&mut self) {
        debug!(count = self.registered.len(), "Clearing language registry");
        self.locale_to_identity.clear();
        self.registered.clear();
        self.default = None;
    }
}

/// Built-in locale aliases, in registration order.
///
/// Several system locales map to the same supported identity: generic `zh`
/// shares Simplified Chinese with `zh-CN`, `zh-HK` shares Traditional Chinese
/// with `zh-TW`, and the common English regions share English.
pub fn builtin_languages() -> Vec<(LocaleKey, LanguageIdentity)> {
    let simplified = LanguageIdentity::simplified_chinese();
    let traditional = LanguageIdentity::traditional_chinese();
    let english = LanguageIdentity::english();

    vec![
        (LocaleKey::from_static("zh", "CN"), simplified.clone()),
        (LocaleKey::from_static("zh", ""), simplified),
        (LocaleKey::from_static("zh", "TW"), traditional.clone()),
        (LocaleKey::from_static("zh", "HK"), traditional),
        (LocaleKey::from_static("en", ""), english.clone()),
        (LocaleKey::from_static("en", "US"), english.clone()),
        (LocaleKey::from_static("en", "GB"), english.clone()),
        (LocaleKey::from_static("en", "CA"), english),
    ]
}
