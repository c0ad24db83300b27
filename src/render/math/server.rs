//! Server-side KaTeX renderer.

use katex::{OptsBuilder, OutputType};

use super::MathRenderer;
use crate::error::MathError;

/// Renderer that typesets formulas to KaTeX HTML with an embedded JS engine.
///
/// KaTeX is run with `throw_on_error` enabled: a parse error comes back as a
/// [`MathError`] so the pipeline can keep the literal text instead of KaTeX's
/// red error span.
pub struct KaTeXHtmlRenderer;

impl KaTeXHtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    fn typeset(&self, latex: &str, display_mode: bool) -> Result<String, MathError> {
        let mut builder = OptsBuilder::default();
        builder.display_mode(display_mode);
        builder.output_type(OutputType::Html);
        builder.throw_on_error(true);

        let opts = builder
            .build()
            .map_err(|err| MathError::Engine(format!("failed to build KaTeX options: {err}")))?;

        katex::render_with_opts(latex, opts).map_err(|err| match err {
            katex::Error::JsExecError(message) => MathError::Syntax(message),
            other => MathError::Engine(format!("KaTeX rendering failed: {other}")),
        })
    }
}

impl Default for KaTeXHtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MathRenderer for KaTeXHtmlRenderer {
    fn render_inline(&self, latex: &str) -> Result<String, MathError> {
        self.typeset(latex, false)
    }

    fn render_display(&self, latex: &str) -> Result<String, MathError> {
        self.typeset(latex, true)
    }

    fn head_content(&self) -> Option<String> {
        Some(KATEX_CSS.to_string())
    }
}

const KATEX_CSS: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css" crossorigin="anonymous">"#;
