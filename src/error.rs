//! Error types for the mathmark library.
//!
//! Rendering itself never fails: [`MathError`] is produced by math backends and
//! consumed span by span inside the pipeline. Only configuration loading (and
//! the CLI built on it) surfaces [`Error`] to callers.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while loading a [`RenderConfig`](crate::RenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(String),

    #[error("Unknown math backend: {0}")]
    UnknownBackend(String),
}

/// Errors reported by a math backend for a single formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("Math syntax error: {0}")]
    Syntax(String),

    #[error("Math engine error: {0}")]
    Engine(String),
}
