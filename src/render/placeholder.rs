//! Intermediate segments and the placeholder table for rendered block math.

/// A piece of the document between pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Escaped literal text that the inline pass may still scan.
    Text(String),
    /// Escaped literal text that is final, such as the echo of a failed span.
    Literal(String),
    /// Rendered inline math.
    Markup(String),
    /// Rendered block math, stored in the [`PlaceholderTable`].
    Placeholder(usize),
}

/// Rendered block markup, indexed by placeholder.
///
/// Block markup is held here while the inline pass runs so none of it can be
/// scanned for `$` delimiters.
#[derive(Debug, Default)]
pub(crate) struct PlaceholderTable {
    entries: Vec<String>,
}

impl PlaceholderTable {
    /// Store markup and return its placeholder index.
    pub(crate) fn insert(&mut self, markup: String) -> usize {
        self.entries.push(markup);
        self.entries.len() - 1
    }

    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
