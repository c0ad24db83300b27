//! Scanner locating math spans in escaped text.
//!
//! Scanning is left to right and first-match-wins: once a span is consumed the
//! scanner resumes after it and never revisits the consumed range.

mod lexer;

pub use lexer::{display_math, inline_math, Token};

/// A math span found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan<'a> {
    /// Byte offset of the opening delimiter.
    pub start: usize,
    /// Byte offset just past the closing delimiter.
    pub end: usize,
    /// The formula between the delimiters, untrimmed.
    pub content: &'a str,
}

impl MathSpan<'_> {
    /// The full matched text, delimiters included.
    pub fn matched<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Find every `$$...$$` span.
pub fn find_display_spans(text: &str) -> Vec<MathSpan<'_>> {
    let mut spans = Vec::new();
    let mut offset = 0;

    while let Some(pos) = text[offset..].find("$$") {
        let start = offset + pos;
        match display_math(&text[start..]) {
            Ok((rest, token)) => {
                let end = text.len() - rest.len();
                spans.push(MathSpan {
                    start,
                    end,
                    content: token.content(),
                });
                offset = end;
            }
            // No closing `$$` after this opener means none after any later one.
            Err(_) => break,
        }
    }

    spans
}

/// Find every `$...$` span.
pub fn find_inline_spans(text: &str) -> Vec<MathSpan<'_>> {
    let mut spans = Vec::new();
    let mut offset = 0;

    while let Some(pos) = text[offset..].find('$') {
        let start = offset + pos;
        match inline_math(&text[start..]) {
            Ok((rest, token)) => {
                let end = text.len() - rest.len();
                spans.push(MathSpan {
                    start,
                    end,
                    content: token.content(),
                });
                offset = end;
            }
            Err(_) => offset = start + 1,
        }
    }

    spans
}
