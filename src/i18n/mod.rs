//! Display language registration, resolution and persistence.
//!
//! # Architecture
//!
//! - `locale`: `LocaleKey` lookup keys and system locale providers
//! - `language`: `LanguageIdentity`, the immutable supported-language value
//! - `registry`: catalog of supported languages, locale aliases and the default
//! - `resolver`: active-language resolution, persistence and application
//!
//! # Example
//!
//! ```rust,ignore
//! use language_manager::i18n::{apply, ActiveLocale, LanguageRegistry, LanguageResolver, SysLocaleProvider};
//! use language_manager::store::SqliteStore;
//!
//! let registry = LanguageRegistry::with_builtins();
//! let store = SqliteStore::open("preferences.db")?;
//! let resolver = LanguageResolver::new(&registry);
//!
//! let language = resolver.current(&SysLocaleProvider, &store)?;
//! let mut active = ActiveLocale::new();
//! apply(&language, &mut active);
//! ```

mod language;
mod locale;
mod registry;
mod resolver;

pub use language::LanguageIdentity;
pub use locale::{FixedLocale, LocaleKey, SysLocaleProvider, SystemLocaleProvider};
pub use registry::{builtin_languages, LanguageRegistry};
pub use resolver::{apply, ActiveLocale, LanguageResolver, ResourceSink, PERSISTENT_KEY};
