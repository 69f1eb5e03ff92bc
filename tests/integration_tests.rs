//! Integration tests for the language manager
//!
//! These tests drive the public API the way an application would across
//! restarts: build a registry, resolve against a durable store, change the
//! preference, and resolve again with a fresh registry and reopened store.

use language_manager::i18n::{
    apply, ActiveLocale, FixedLocale, LanguageIdentity, LanguageRegistry, LanguageResolver,
    LocaleKey, PERSISTENT_KEY,
};
use language_manager::store::{MemoryStore, PreferenceStore, SqliteStore};
use language_manager::LanguageError;
use std::path::Path;
use tempfile::TempDir;

// ==================== Test Helpers ====================

fn system(tag: &str) -> FixedLocale {
    FixedLocale(LocaleKey::parse(tag).expect("valid tag"))
}

fn open_store(path: &Path) -> SqliteStore {
    SqliteStore::open(path).expect("Failed to open store")
}

fn german() -> LanguageIdentity {
    LanguageIdentity::from_parts("de", "DE", "Deutsch").expect("valid identity")
}

/// Builtins plus German, as a newer app version might ship
fn registry_with_german() -> LanguageRegistry {
    let mut registry = LanguageRegistry::with_builtins();
    registry.register(LocaleKey::parse("de-DE").unwrap(), german());
    registry.register(LocaleKey::parse("de").unwrap(), german());
    registry
}

// ==================== Startup Resolution Tests ====================

#[test]
fn test_first_launch_follows_system_locale() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&temp_dir.path().join("prefs.db"));
    let registry = LanguageRegistry::with_builtins();
    let resolver = LanguageResolver::new(&registry);

    assert_eq!(
        resolver.current(&system("en-US"), &store).unwrap(),
        LanguageIdentity::english()
    );
    assert_eq!(
        resolver.current(&system("zh-HK"), &store).unwrap(),
        LanguageIdentity::traditional_chinese()
    );
    assert_eq!(
        resolver.current(&system("fr-FR"), &store).unwrap(),
        LanguageIdentity::simplified_chinese()
    );
    assert_eq!(store.get_string(PERSISTENT_KEY), None);
}

#[test]
fn test_choice_survives_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("prefs.db");

    // First run: user picks Traditional Chinese
    {
        let registry = LanguageRegistry::with_builtins();
        let store = open_store(&db_path);
        let resolver = LanguageResolver::new(&registry);
        let committed = resolver
            .set_current(&store, &LanguageIdentity::traditional_chinese())
            .expect("registered language");
        assert!(committed);
    }

    // Second run: fresh registry, reopened store, English system locale
    {
        let registry = LanguageRegistry::with_builtins();
        let store = open_store(&db_path);
        let resolver = LanguageResolver::new(&registry);
        assert_eq!(
            resolver.current(&system("en-US"), &store).unwrap(),
            LanguageIdentity::traditional_chinese()
        );
    }
}

#[test]
fn test_dropped_language_self_heals_after_upgrade() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("prefs.db");

    // Old version supported German and the user chose it
    {
        let registry = registry_with_german();
        let store = open_store(&db_path);
        LanguageResolver::new(&registry)
            .set_current(&store, &german())
            .unwrap();
    }

    // New version dropped German
    {
        let registry = LanguageRegistry::with_builtins();
        let store = open_store(&db_path);
        let resolver = LanguageResolver::new(&registry);

        assert_eq!(
            resolver.current(&system("de-DE"), &store).unwrap(),
            LanguageIdentity::simplified_chinese()
        );
        assert_eq!(store.get_string(PERSISTENT_KEY), None);

        // Next start behaves like a first launch
        assert_eq!(
            resolver.current(&system("en-GB"), &store).unwrap(),
            LanguageIdentity::english()
        );
    }
}

#[test]
fn test_reset_registry_then_resolve_uses_new_default() {
    let store = MemoryStore::new();
    let mut registry = LanguageRegistry::with_builtins();
    LanguageResolver::new(&registry)
        .set_current(&store, &LanguageIdentity::simplified_chinese())
        .unwrap();

    registry.clear_register();
    registry.register(LocaleKey::parse("de").unwrap(), german());
    registry.register(LocaleKey::parse("en").unwrap(), LanguageIdentity::english());

    let resolver = LanguageResolver::new(&registry);
    assert_eq!(resolver.current(&system("en"), &store).unwrap(), german());
    assert!(store.is_empty());
}

// ==================== Selection Tests ====================

#[test]
fn test_unregistered_choice_is_rejected() {
    let store = MemoryStore::new();
    let registry = LanguageRegistry::with_builtins();
    let resolver = LanguageResolver::new(&registry);

    let result = resolver.set_current(&store, &german());
    match result {
        Err(LanguageError::InvalidArgument(message)) => assert!(message.contains("Deutsch")),
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
    assert!(store.is_empty());
}

#[test]
fn test_selection_does_not_change_applied_language() {
    let store = MemoryStore::new();
    let registry = LanguageRegistry::with_builtins();
    let resolver = LanguageResolver::new(&registry);

    let mut active = ActiveLocale::new();
    let startup = resolver.current(&system("en-US"), &store).unwrap();
    apply(&startup, &mut active);

    resolver
        .set_current(&store, &LanguageIdentity::simplified_chinese())
        .unwrap();

    // Applied locale only changes when the consumer resolves again
    assert_eq!(active.locale().map(|l| l.to_string()).as_deref(), Some("en"));

    let reloaded = resolver.current(&system("en-US"), &store).unwrap();
    apply(&reloaded, &mut active);
    assert_eq!(active.locale().map(|l| l.to_string()).as_deref(), Some("zh-CN"));
}

#[test]
fn test_persisted_payload_format() {
    let store = MemoryStore::new();
    let registry = LanguageRegistry::with_builtins();
    LanguageResolver::new(&registry)
        .set_current(&store, &LanguageIdentity::traditional_chinese())
        .unwrap();

    let raw = store.get_string(PERSISTENT_KEY).expect("payload stored");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(value["language"], "zh");
    assert_eq!(value["country"], "TW");
    assert_eq!(value["name"], "繁體中文");
}

#[test]
fn test_corrupt_payload_falls_back_to_system_locale() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&temp_dir.path().join("prefs.db"));
    store.put_string(PERSISTENT_KEY, r#"{"language":"en"}"#);

    let registry = LanguageRegistry::with_builtins();
    let resolver = LanguageResolver::new(&registry);
    assert_eq!(
        resolver.current(&system("zh-TW"), &store).unwrap(),
        LanguageIdentity::traditional_chinese()
    );
}

// ==================== Registry Listing Tests ====================

#[test]
fn test_all_languages_listing_is_stable() {
    let registry = registry_with_german();
    let first: Vec<_> = registry.all_languages().to_vec();
    let second: Vec<_> = registry.all_languages().to_vec();

    assert_eq!(first, second);
    assert_eq!(first.last(), Some(&german()));
    assert_eq!(first.len(), 4);
}
