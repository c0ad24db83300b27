//! Math rendering backends.

mod katex;
mod mathml;
#[cfg(feature = "server-katex")]
mod server;

pub use self::katex::KaTeXRenderer;
pub use self::mathml::MathMLRenderer;
#[cfg(feature = "server-katex")]
pub use self::server::KaTeXHtmlRenderer;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ConfigError, MathError};

/// Math rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MathBackend {
    /// Output escaped LaTeX for KaTeX to render client-side.
    #[default]
    #[serde(rename = "katex")]
    KaTeX,
    /// Output escaped LaTeX for MathJax to render client-side.
    #[serde(rename = "mathjax")]
    MathJax,
    /// Convert to MathML for native browser rendering.
    #[serde(rename = "mathml")]
    MathML,
    /// Typeset to KaTeX HTML on the server (requires `server-katex`).
    #[serde(rename = "katex-html")]
    KaTeXHtml,
}

impl MathBackend {
    /// The name used in configuration files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            MathBackend::KaTeX => "katex",
            MathBackend::MathJax => "mathjax",
            MathBackend::MathML => "mathml",
            MathBackend::KaTeXHtml => "katex-html",
        }
    }
}

impl fmt::Display for MathBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MathBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "katex" => Ok(MathBackend::KaTeX),
            "mathjax" => Ok(MathBackend::MathJax),
            "mathml" => Ok(MathBackend::MathML),
            "katex-html" | "katex_html" => Ok(MathBackend::KaTeXHtml),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Whether a formula is typeset within a line or on its own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    Inline,
    Display,
}

impl MathMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MathMode::Inline => "inline",
            MathMode::Display => "display",
        }
    }
}

/// Trait for math renderers.
///
/// Implementations receive the raw (unescaped) formula source and must return
/// markup that is safe to insert into an HTML document. A returned error is
/// recovered by the caller, which falls back to the literal text.
pub trait MathRenderer: Send + Sync {
    /// Render inline math.
    fn render_inline(&self, latex: &str) -> Result<String, MathError>;

    /// Render display math.
    fn render_display(&self, latex: &str) -> Result<String, MathError>;

    /// Get any required HTML head content (scripts, styles).
    fn head_content(&self) -> Option<String>;

    /// Render in the given mode.
    fn render(&self, latex: &str, mode: MathMode) -> Result<String, MathError> {
        match mode {
            MathMode::Inline => self.render_inline(latex),
            MathMode::Display => self.render_display(latex),
        }
    }
}

/// Create a math renderer for the given backend.
pub fn create_renderer(backend: MathBackend) -> Box<dyn MathRenderer> {
    match backend {
        MathBackend::KaTeX => Box::new(KaTeXRenderer::new()),
        MathBackend::MathJax => Box::new(KaTeXRenderer::new_mathjax()),
        MathBackend::MathML => Box::new(MathMLRenderer::new()),
        #[cfg(feature = "server-katex")]
        MathBackend::KaTeXHtml => Box::new(KaTeXHtmlRenderer::new()),
        #[cfg(not(feature = "server-katex"))]
        MathBackend::KaTeXHtml => {
            tracing::warn!(
                target = "mathmark::render::math",
                "server-katex feature disabled; falling back to client-side KaTeX"
            );
            Box::new(KaTeXRenderer::new())
        }
    }
}
