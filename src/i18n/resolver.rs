//! Resolve, persist and apply the active display language.
//!
//! Resolution order on every cold start:
//!
//! 1. A persisted preference that the registry still recognizes.
//! 2. Nothing persisted: the system locale, looked up in the registry
//!    (which falls back to the default for unknown locales). When the
//!    platform reports no usable locale, the registry default.
//! 3. A persisted preference the registry no longer recognizes: the entry is
//!    erased and the registry default is returned.
//!
//! [`LanguageResolver::set_current`] only changes what the *next* resolution
//! returns. Whatever was already applied stays applied until the consumer
//! resolves again (typically after a restart or reload).

use crate::error::{LanguageError, Result};
use crate::i18n::{LanguageIdentity, LanguageRegistry, LocaleKey, SystemLocaleProvider};
use crate::store::PreferenceStore;
use tracing::{debug, info, warn};
use unic_langid::LanguageIdentifier;

/// Store key the preference is persisted under.
pub const PERSISTENT_KEY: &str = "language_manager::LanguageIdentity";

/// Computes the active language from the registry, store and system locale.
#[derive(Debug, Clone, Copy)]
pub struct LanguageResolver<'a> {
    registry: &'a LanguageRegistry,
}

impl<'a> LanguageResolver<'a> {
    pub fn new(registry: &'a LanguageRegistry) -> Self {
        Self { registry }
    }

    /// Resolve the language the application should use now.
    ///
    /// Never writes to the store, except to erase a preference that is no
    /// longer registered.
    ///
    /// # Errors
    /// Returns `IllegalState` if the registry is empty.
    pub fn current<L, S>(&self, locale: &L, store: &S) -> Result<LanguageIdentity>
    where
        L: SystemLocaleProvider + ?Sized,
        S: PreferenceStore + ?Sized,
    {
        match self.persisted(store) {
            None => match locale.system_locale() {
                Some(system) => {
                    let identity = self.registry.language_for(&system)?;
                    debug!(locale = %system, language = %identity, "Resolved from system locale");
                    Ok(identity.clone())
                }
                None => {
                    let identity = self.registry.default_language()?;
                    debug!(language = %identity, "No system locale, using default");
                    Ok(identity.clone())
                }
            },
            Some(identity) if self.registry.contains_language(&identity) => {
                debug!(language = %identity, "Resolved from saved preference");
                Ok(identity)
            }
            Some(stale) => {
                warn!(language = %stale, "Saved language is no longer supported, erasing it");
                self.clear_current(store);
                Ok(self.registry.default_language()?.clone())
            }
        }
    }

    /// Persist `identity` as the user's choice for the next resolution.
    ///
    /// Returns whether the store committed the write.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `identity` is not registered; the store is
    /// left untouched.
    pub fn set_current<S>(&self, store: &S, identity: &LanguageIdentity) -> Result<bool>
    where
        S: PreferenceStore + ?Sized,
    {
        if !self.registry.contains_language(identity) {
            return Err(LanguageError::InvalidArgument(format!(
                "language is not registered: {}",
                identity
            )));
        }

        let Some(json) = identity.to_json() else {
            warn!(language = %identity, "Failed to serialize language");
            return Ok(false);
        };

        let committed = store.put_string(PERSISTENT_KEY, &json);
        if committed {
            info!(language = %identity, "Saved language preference");
        }
        Ok(committed)
    }

    /// The persisted preference, if any and if it parses.
    ///
    /// Does not check the registry.
    pub fn persisted<S>(&self, store: &S) -> Option<LanguageIdentity>
    where
        S: PreferenceStore + ?Sized,
    {
        store
            .get_string(PERSISTENT_KEY)
            .and_then(|json| LanguageIdentity::from_json(&json))
    }

    /// Erase the persisted preference. Returns whether one was removed.
    pub fn clear_current<S>(&self, store: &S) -> bool
    where
        S: PreferenceStore + ?Sized,
    {
        store.remove(PERSISTENT_KEY)
    }
}

/// Receives the resolved locale so subsequently loaded text uses it.
pub trait ResourceSink {
    fn set_locale(&mut self, locale: &LocaleKey);
}

/// Push `identity`'s locale into `sink`.
///
/// Touches neither the registry nor the store.
pub fn apply<S>(identity: &LanguageIdentity, sink: &mut S)
where
    S: ResourceSink + ?Sized,
{
    let locale = identity.to_locale();
    debug!(locale = %locale, "Applying language");
    sink.set_locale(&locale);
}

/// A ready-made sink that remembers the last applied locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveLocale {
    locale: Option<LocaleKey>,
}

impl ActiveLocale {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last applied locale, if any.
    pub fn locale(&self) -> Option<&LocaleKey> {
        self.locale.as_ref()
    }

    /// The last applied locale as a `unic-langid` identifier, for resource
    /// loaders such as Fluent bundles.
    pub fn language_identifier(&self) -> Option<LanguageIdentifier> {
        self.locale.as_ref().and_then(LocaleKey::to_language_identifier)
    }
}

impl ResourceSink for ActiveLocale {
    fn set_locale(&mut self, locale: &LocaleKey) {
        self.locale = Some(locale.clone());
    }
}
