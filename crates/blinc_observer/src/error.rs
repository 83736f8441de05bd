//! Observer error types

use thiserror::Error;

/// Errors raised while binding or updating an observer
#[derive(Error, Debug)]
pub enum BindError {
    /// The binding was requested with missing or unusable inputs
    #[error("Invalid binding: {0}")]
    Validation(&'static str),

    /// The selector produced a value that cannot be structurally cloned
    #[error("Snapshot is not serializable: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The selector produced a truthy value that is not a key/value mapping
    #[error("Selector must return a mapping, got {kind}")]
    NotAMapping { kind: &'static str },

    /// Observer configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for observer operations
pub type Result<T> = std::result::Result<T, BindError>;
