//! Language identity: a supported display language.
//!
//! A [`LanguageIdentity`] is an immutable `(language, country, name)` triple.
//! Equality and hashing cover all three fields, so two identities for the same
//! locale with different display names are *different* identities. Relabelling
//! a language therefore invalidates preferences saved under the old label.

use crate::error::{LanguageError, Result};
use crate::i18n::LocaleKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A supported display language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageIdentity {
    locale: LocaleKey,
    name: String,
}

/// Flat record written to the preference store.
///
/// All three fields are required; a payload missing any of them is rejected.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedLanguage {
    language: String,
    country: String,
    name: String,
}

impl LanguageIdentity {
    /// Create an identity for `locale` with a human-readable `name`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `name` is empty or blank.
    pub fn new(locale: LocaleKey, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LanguageError::InvalidArgument(format!(
                "display name is empty for locale '{}'",
                locale
            )));
        }

        Ok(Self { locale, name })
    }

    /// Create an identity from raw codes, validating every field.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the language code or name is empty.
    pub fn from_parts(language: &str, country: &str, name: &str) -> Result<Self> {
        Self::new(LocaleKey::new(language, country)?, name)
    }

    fn builtin(language: &'static str, country: &'static str, name: &'static str) -> Self {
        Self {
            locale: LocaleKey::from_static(language, country),
            name: name.to_string(),
        }
    }

    /// Simplified Chinese (`zh-CN`).
    pub fn simplified_chinese() -> Self {
        Self::builtin("zh", "CN", "简体中文")
    }

    /// Traditional Chinese (`zh-TW`).
    pub fn traditional_chinese() -> Self {
        Self::builtin("zh", "TW", "繁體中文")
    }

    /// English (generic `en`).
    pub fn english() -> Self {
        Self::builtin("en", "", "English")
    }

    /// The lowercase language code (e.g. "zh").
    pub fn language_code(&self) -> &str {
        self.locale.language()
    }

    /// The uppercase country code, possibly empty.
    pub fn country_code(&self) -> &str {
        self.locale.country()
    }

    /// The display name shown to users (e.g. "简体中文").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The locale this identity renders text in.
    pub fn to_locale(&self) -> LocaleKey {
        self.locale.clone()
    }

    /// Serialize to the persisted JSON record.
    pub(crate) fn to_json(&self) -> Option<String> {
        let record = PersistedLanguage {
            language: self.language_code().to_string(),
            country: self.country_code().to_string(),
            name: self.name.clone(),
        };

        serde_json::to_string(&record).ok()
    }

    /// Rebuild an identity from a persisted JSON record.
    ///
    /// Malformed JSON, missing fields and empty codes all yield `None`.
    pub(crate) fn from_json(json: &str) -> Option<Self> {
        let record: PersistedLanguage = match serde_json::from_str(json) {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "Discarding unparsable language record");
                return None;
            }
        };

        match Self::from_parts(&record.language, &record.country, &record.name) {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!(error = %e, "Discarding invalid language record");
                None
            }
        }
    }
}

impl fmt::Display for LanguageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.locale)
    }
}
