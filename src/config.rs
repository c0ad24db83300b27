//! Renderer configuration.
//!
//! ```toml
//! backend = "mathjax"
//! line_break = "<br />"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::render::MathBackend;

/// Configuration for a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Math rendering backend.
    pub backend: MathBackend,
    /// Markup inserted for each newline in literal text.
    ///
    /// This is emitted verbatim and must itself be trusted HTML.
    pub line_break: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: MathBackend::KaTeX,
            line_break: "<br>".to_string(),
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Toml(e.to_string()))?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }
}
