//! Rendering pipeline from raw text to a safe HTML fragment.
//!
//! The stages run in a fixed order:
//!
//! 1. escape the whole input;
//! 2. resolve `$$...$$` block math;
//! 3. park rendered blocks in a placeholder table;
//! 4. resolve `$...$` inline math in the text between blocks;
//! 5. restore the placeholders;
//! 6. turn the remaining literal newlines into line breaks.
//!
//! Blocks go first because `$$` would otherwise read as two inline
//! delimiters. Newlines are converted last, and only in literal text, so
//! multi-line formulas reach the math backend intact.

pub mod math;
mod placeholder;

pub use math::{create_renderer, MathBackend, MathMode, MathRenderer};

use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::error::MathError;
use crate::escape::{escape_html, unescape_html};
use crate::parser::{find_display_spans, find_inline_spans};
use placeholder::{PlaceholderTable, Segment};

/// Renders raw text with embedded math into an HTML fragment.
///
/// A `Renderer` holds no per-call state and can be shared across threads.
pub struct Renderer {
    config: RenderConfig,
    math: Box<dyn MathRenderer>,
}

#[derive(Debug, Default)]
struct Tally {
    rendered: usize,
    failed: usize,
}

impl Renderer {
    /// Create a renderer using the backend named in `config`.
    pub fn new(config: RenderConfig) -> Self {
        let math = create_renderer(config.backend);
        Self { config, math }
    }

    /// Create a renderer with a caller-supplied math engine.
    ///
    /// `config.backend` is ignored.
    pub fn with_math_renderer(config: RenderConfig, math: Box<dyn MathRenderer>) -> Self {
        Self { config, math }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Head content (styles, scripts) the host page needs for the output.
    pub fn head_content(&self) -> Option<String> {
        self.math.head_content()
    }

    /// Render `input` to an HTML fragment.
    ///
    /// Never fails. A formula the backend rejects is kept as its literal,
    /// escaped text.
    pub fn render(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }

        let mut tally = Tally::default();
        let escaped = escape_html(input);

        let mut table = PlaceholderTable::default();
        let segments = self.resolve_blocks(&escaped, &mut table, &mut tally);
        let segments = self.resolve_inlines(segments, &mut tally);
        let html = self.assemble(&segments, &table);

        debug!(
            target = "mathmark::render",
            input_len = input.len(),
            blocks = table.len(),
            rendered = tally.rendered,
            failed = tally.failed,
            "rendered text"
        );

        html
    }

    /// Render optional input; `None` yields an empty string.
    pub fn render_opt(&self, input: Option<&str>) -> String {
        input.map(|s| self.render(s)).unwrap_or_default()
    }

    fn resolve_blocks(
        &self,
        escaped: &str,
        table: &mut PlaceholderTable,
        tally: &mut Tally,
    ) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut last = 0;

        for span in find_display_spans(escaped) {
            if span.start > last {
                segments.push(Segment::Text(escaped[last..span.start].to_string()));
            }
            let segment = match self.render_formula(span.content, MathMode::Display) {
                Ok(markup) => {
                    tally.rendered += 1;
                    Segment::Placeholder(table.insert(markup))
                }
                Err(err) => {
                    tally.failed += 1;
                    log_fallback(span.content, MathMode::Display, &err);
                    Segment::Literal(span.matched(escaped).to_string())
                }
            };
            segments.push(segment);
            last = span.end;
        }

        if last < escaped.len() {
            segments.push(Segment::Text(escaped[last..].to_string()));
        }
        segments
    }

    fn resolve_inlines(&self, segments: Vec<Segment>, tally: &mut Tally) -> Vec<Segment> {
        let mut out = Vec::with_capacity(segments.len());

        for segment in segments {
            let text = match segment {
                Segment::Text(text) => text,
                other => {
                    out.push(other);
                    continue;
                }
            };

            let mut last = 0;
            for span in find_inline_spans(&text) {
                if span.start > last {
                    out.push(Segment::Literal(text[last..span.start].to_string()));
                }
                match self.render_formula(span.content, MathMode::Inline) {
                    Ok(markup) => {
                        tally.rendered += 1;
                        out.push(Segment::Markup(markup));
                    }
                    Err(err) => {
                        tally.failed += 1;
                        log_fallback(span.content, MathMode::Inline, &err);
                        out.push(Segment::Literal(span.matched(&text).to_string()));
                    }
                }
                last = span.end;
            }
            if last < text.len() {
                out.push(Segment::Literal(text[last..].to_string()));
            }
        }

        out
    }

    /// Restore placeholders and convert newlines in literal text.
    fn assemble(&self, segments: &[Segment], table: &PlaceholderTable) -> String {
        let mut html = String::new();

        for segment in segments {
            match segment {
                Segment::Text(text) | Segment::Literal(text) => {
                    push_with_breaks(&mut html, text, &self.config.line_break)
                }
                Segment::Markup(markup) => html.push_str(markup),
                Segment::Placeholder(index) => {
                    if let Some(markup) = table.get(*index) {
                        html.push_str(markup);
                    }
                }
            }
        }

        html
    }

    /// Render one formula captured from escaped text.
    fn render_formula(&self, content: &str, mode: MathMode) -> Result<String, MathError> {
        let source = unescape_html(content.trim());
        if source.is_empty() {
            return Ok(empty_markup(mode));
        }
        self.math.render(&source, mode)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn empty_markup(mode: MathMode) -> String {
    match mode {
        MathMode::Inline => r#"<span class="math inline"></span>"#.to_string(),
        MathMode::Display => r#"<div class="math display"></div>"#.to_string(),
    }
}

fn push_with_breaks(html: &mut String, text: &str, line_break: &str) {
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        if lines.peek().is_some() {
            html.push_str(line.strip_suffix('\r').unwrap_or(line));
            html.push_str(line_break);
        } else {
            html.push_str(line);
        }
    }
}

fn log_fallback(content: &str, mode: MathMode, err: &MathError) {
    warn!(
        target = "mathmark::render",
        mode = mode.as_str(),
        formula_len = content.len(),
        error = %err,
        "math span kept as literal text"
    );
}
