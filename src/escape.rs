//! HTML escaping for literal text.

/// Escape `&`, `<` and `>` for use as HTML text content.
///
/// `&` is handled in the same pass as the angle brackets, so every input
/// character is escaped exactly once.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Exact inverse of [`escape_html`].
///
/// Only the three entities produced by `escape_html` are decoded. Anything
/// else that looks like an entity is left alone, so
/// `unescape_html(&escape_html(s)) == s` for every `s`.
pub fn unescape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (decoded, len) = if tail.starts_with("&amp;") {
            ('&', 5)
        } else if tail.starts_with("&lt;") {
            ('<', 4)
        } else if tail.starts_with("&gt;") {
            ('>', 4)
        } else {
            ('&', 1)
        };
        out.push(decoded);
        rest = &tail[len..];
    }

    out.push_str(rest);
    out
}
