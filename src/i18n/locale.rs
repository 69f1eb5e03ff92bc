//! Locale keys and system locale detection.
//!
//! A [`LocaleKey`] is the `(language, script, country)` triple the registry is
//! keyed by. It is only a lookup key; it is never persisted on its own.

use crate::error::{LanguageError, Result};
use std::fmt;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// A `(language, country)` lookup key, plus the script when a tag carries one.
///
/// The language is stored lowercase and is never empty. The country is stored
/// uppercase and may be empty (e.g. the generic `zh` or `en` locales). The
/// script is empty unless parsed from a tag such as `zh-Hant-TW`; a key with a
/// script never equals the same key without one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleKey {
    language: String,
    script: String,
    country: String,
}

impl LocaleKey {
    /// Create a locale key from its parts.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `language` is empty or blank.
    pub fn new(language: &str, country: &str) -> Result<Self> {
        let language = language.trim();
        if language.is_empty() {
            return Err(LanguageError::InvalidArgument(
                "locale language code is empty".to_string(),
            ));
        }

        Ok(Self {
            language: language.to_lowercase(),
            script: String::new(),
            country: country.trim().to_uppercase(),
        })
    }

    /// Build a key from parts known to be valid (built-in tables).
    pub(crate) fn from_static(language: &'static str, country: &'static str) -> Self {
        Self {
            language: language.to_string(),
            script: String::new(),
            country: country.to_string(),
        }
    }

    /// Parse a BCP-47 or POSIX style locale tag.
    ///
    /// Accepts `en`, `en-US`, `zh_CN`, `zh-Hant-TW` and `en_US.UTF-8@euro`.
    /// Encodings and modifiers are dropped. Script subtags are kept, so
    /// `zh-Hant-TW` is a different key from `zh-TW` and only matches a
    /// registration made for that exact script.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the tag is empty or not a valid identifier.
    pub fn parse(tag: &str) -> Result<Self> {
        let stripped = tag
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .replace('_', "-");

        if stripped.is_empty() {
            return Err(LanguageError::InvalidArgument(
                "locale tag is empty".to_string(),
            ));
        }

        let langid: LanguageIdentifier = stripped.parse().map_err(|e| {
            LanguageError::InvalidArgument(format!("invalid locale tag '{}': {}", tag, e))
        })?;

        Self::from_language_identifier(&langid)
    }

    /// Convert a parsed `unic-langid` identifier into a key.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for the undetermined language (`und`).
    pub fn from_language_identifier(langid: &LanguageIdentifier) -> Result<Self> {
        if langid.language.as_str() == "und" {
            return Err(LanguageError::InvalidArgument(format!(
                "locale '{}' has no language",
                langid
            )));
        }

        let country = langid.region.as_ref().map(|r| r.as_str()).unwrap_or("");
        let mut key = Self::new(langid.language.as_str(), country)?;
        if let Some(script) = langid.script.as_ref() {
            key.script = script.as_str().to_string();
        }
        Ok(key)
    }

    /// The lowercase language code (e.g. "zh").
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The title-case script code, empty unless the tag carried one (e.g. "Hant").
    pub fn script(&self) -> &str {
        &self.script
    }

    /// The uppercase country code, possibly empty (e.g. "CN" or "").
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Convert to a `unic-langid` identifier, if the codes are well-formed.
    pub fn to_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.to_string().parse().ok()
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if !self.script.is_empty() {
            write!(f, "-{}", self.script)?;
        }
        if !self.country.is_empty() {
            write!(f, "-{}", self.country)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for LocaleKey {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Supplies the platform's current locale at resolution time.
///
/// `None` means the platform reported nothing usable; the resolver then uses
/// the registry default.
pub trait SystemLocaleProvider {
    fn system_locale(&self) -> Option<LocaleKey>;
}

impl<F> SystemLocaleProvider for F
where
    F: Fn() -> Option<LocaleKey>,
{
    fn system_locale(&self) -> Option<LocaleKey> {
        self()
    }
}

/// Reads the operating system locale through `sys-locale`.
///
/// Reports `None` when the platform has no locale or one that cannot be
/// parsed (e.g. the POSIX `C` locale).
#[derive(Debug, Clone, Copy, Default)]
pub struct SysLocaleProvider;

impl SystemLocaleProvider for SysLocaleProvider {
    fn system_locale(&self) -> Option<LocaleKey> {
        let Some(tag) = sys_locale::get_locale() else {
            warn!("Platform reported no locale");
            return None;
        };

        match LocaleKey::parse(&tag) {
            Ok(key) => {
                debug!(tag = %tag, locale = %key, "Detected system locale");
                Some(key)
            }
            Err(e) => {
                warn!(tag = %tag, error = %e, "Unparsable system locale");
                None
            }
        }
    }
}

/// Always reports the same locale (configuration overrides, tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub LocaleKey);

impl SystemLocaleProvider for FixedLocale {
    fn system_locale(&self) -> Option<LocaleKey> {
        Some(self.0.clone())
    }
}
