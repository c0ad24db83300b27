//! # mathmark
//!
//! Render chat messages and lesson text that mix prose with LaTeX math into an
//! HTML fragment that is safe to inject into a page.
//!
//! ## Guarantees
//!
//! - Every `&`, `<` and `>` of the input is escaped exactly once.
//! - Recognized math spans are replaced by backend markup; nothing else from
//!   the input reaches the output unescaped.
//! - Rendering never fails. A formula the backend rejects stays in the output
//!   as its literal, escaped text.
//!
//! ## Quick Start
//!
//! ```rust
//! use mathmark::render;
//!
//! let html = render("Water: $\\ce{H2O}$, and 1 < 2\n$$\\Delta G = \\Delta H - T\\Delta S$$");
//! assert!(html.contains("1 &lt; 2<br>"));
//! assert!(html.contains("math inline"));
//! assert!(html.contains("math display"));
//! ```
//!
//! ## Syntax
//!
//! - Inline: `$E = mc^2$`, on one line, no `$` inside.
//! - Display: `$$\int_0^1 x dx$$`, may span lines.
//! - An unmatched `$` is plain text: `price is $5 only`.
//!
//! ## Configuration
//!
//! ```rust
//! use mathmark::{MathBackend, RenderConfig, Renderer};
//!
//! let config = RenderConfig::from_toml_str(r#"backend = "mathjax""#).unwrap();
//! assert_eq!(config.backend, MathBackend::MathJax);
//!
//! let renderer = Renderer::new(config);
//! assert_eq!(renderer.render("a\nb"), "a<br>b");
//! ```
//!
//! ### Math Backends
//!
//! - `katex` (default): escaped LaTeX for client-side KaTeX
//! - `mathjax`: escaped LaTeX for client-side MathJax
//! - `mathml`: native MathML (requires `mathml` feature)
//! - `katex-html`: KaTeX HTML typeset on the server (requires `server-katex` feature)
//!
//! ## Features
//!
//! - `mathml`: Enable MathML rendering backend (requires `latex2mathml` crate)
//! - `server-katex`: Enable server-side KaTeX (requires `katex` crate)
//! - `wasm`: Enable WebAssembly bindings (requires `wasm-bindgen`)
//! - `cli`: Build the `mathmark` command-line tool

pub mod config;
pub mod error;
pub mod escape;
pub mod parser;
pub mod render;

// FFI module (only for non-WASM builds)
#[cfg(not(target_arch = "wasm32"))]
pub mod ffi;

// WASM module (only with feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Convenience re-exports
pub use config::RenderConfig;
pub use error::{ConfigError, Error, MathError, Result};
pub use escape::escape_html;
pub use render::{create_renderer, MathBackend, MathMode, MathRenderer, Renderer};

/// Render text with embedded math using the default configuration.
///
/// # Example
///
/// ```rust
/// use mathmark::render;
///
/// assert_eq!(render("a < b"), "a &lt; b");
/// assert_eq!(render("$$x=1$$"), r#"<div class="math display">\[x=1\]</div>"#);
/// ```
pub fn render(input: &str) -> String {
    Renderer::default().render(input)
}

/// Render text with embedded math using `config`.
pub fn render_with(input: &str, config: &RenderConfig) -> String {
    Renderer::new(config.clone()).render(input)
}
