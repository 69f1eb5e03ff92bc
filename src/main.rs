//! Language manager CLI - resolves, applies and changes the saved display language
//!
//! Usage:
//!   language-manager                 # Resolve and show the current language
//!   language-manager list            # List supported languages
//!   language-manager set zh-TW       # Save a new preference (locale tag or name)
//!   language-manager reset           # Forget the saved preference
//!
//! Optional environment variables:
//! - LANGUAGE_DB_PATH (defaults to the platform data directory)
//! - LANGUAGE_LOCALE_OVERRIDE (replaces the detected system locale)

use anyhow::{bail, Context, Result};
use language_manager::config::Config;
use language_manager::i18n::{
    apply, ActiveLocale, LanguageIdentity, LanguageRegistry, LanguageResolver, LocaleKey,
};
use language_manager::store::SqliteStore;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_manager=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory {}", parent.display())
            })?;
        }
    }
    let store = SqliteStore::open(&config.database_path)?;
    let registry = LanguageRegistry::with_builtins();
    let resolver = LanguageResolver::new(&registry);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("current") => {
            let locale = config.locale_provider();
            let language = resolver.current(&*locale, &store)?;

            let mut active = ActiveLocale::new();
            apply(&language, &mut active);
            info!(language = %language, "Language applied");
            println!("{}", language);
        }
        Some("list") => {
            let default = registry.default_language()?;
            for language in registry.all_languages() {
                let marker = if language == default { " (default)" } else { "" };
                println!("{}{}", language, marker);
            }
        }
        Some("set") => {
            let Some(query) = args.get(1) else {
                bail!("Usage: language-manager set <locale tag or name>");
            };
            let language = find_language(&registry, query)?;

            if resolver.set_current(&store, &language)? {
                println!("Saved {}. Restart the application to use it.", language);
            } else {
                bail!("Failed to save language preference");
            }
        }
        Some("reset") => {
            if resolver.clear_current(&store) {
                println!("Saved language preference removed.");
            } else {
                println!("No saved language preference.");
            }
        }
        Some(other) => bail!("Unknown command: {} (expected current, list, set or reset)", other),
    }

    Ok(())
}

/// Match a registered language by exact locale alias or by display name.
fn find_language(registry: &LanguageRegistry, query: &str) -> Result<LanguageIdentity> {
    if let Ok(locale) = LocaleKey::parse(query) {
        if let Some(language) = registry.lookup(&locale) {
            return Ok(language.clone());
        }
    }

    registry
        .all_languages()
        .iter()
        .find(|language| language.name() == query)
        .cloned()
        .with_context(|| {
            let supported: Vec<String> = registry
                .all_languages()
                .iter()
                .map(|language| language.to_locale().to_string())
                .collect();
            format!(
                "Unsupported language '{}' (supported: {})",
                query,
                supported.join(", ")
            )
        })
}
