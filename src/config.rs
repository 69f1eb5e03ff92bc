use crate::i18n::{FixedLocale, LocaleKey, SysLocaleProvider, SystemLocaleProvider};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Persistence
    pub database_path: PathBuf,

    // Locale detection
    pub locale_override: Option<LocaleKey>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Persistence - SQLite file holding the saved preference
            database_path: std::env::var("LANGUAGE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),

            // Locale detection - replaces the OS locale when set
            locale_override: match std::env::var("LANGUAGE_LOCALE_OVERRIDE") {
                Ok(tag) if !tag.trim().is_empty() => Some(
                    LocaleKey::parse(&tag)
                        .with_context(|| format!("LANGUAGE_LOCALE_OVERRIDE is invalid: {}", tag))?,
                ),
                _ => None,
            },
        })
    }

    /// The locale source to resolve against: the override if set, else the OS.
    pub fn locale_provider(&self) -> Box<dyn SystemLocaleProvider> {
        match &self.locale_override {
            Some(locale) => Box::new(FixedLocale(locale.clone())),
            None => Box::new(SysLocaleProvider),
        }
    }
}

/// `<data dir>/language-manager/preferences.db`, or a file in the working
/// directory when the platform has no data directory.
fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("language-manager").join("preferences.db"))
        .unwrap_or_else(|| PathBuf::from("language-manager.db"))
}
