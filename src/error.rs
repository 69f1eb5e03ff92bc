//! Error types for language registration and resolution.

use thiserror::Error;

/// Failures surfaced by the registry and resolver.
///
/// Store and deserialization problems never show up here: they are absorbed
/// by the store backends and degrade to "nothing persisted".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// A required input was empty, or an identity is not registered.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The registry was queried for a default before anything was registered.
    #[error("illegal state: {0}")]
    IllegalState(String),
}

pub type Result<T> = std::result::Result<T, LanguageError>;
