//! MathML renderer.
//!
//! `latex2mathml` copies operator and text characters into its output
//! verbatim, so `a<b` would come back as `<mo><</mo>`. Before conversion the
//! characters that are markup-significant in HTML (`<`, `>`, `\lt`, `\gt`,
//! `\&`, `\And`) are swapped for private-use stand-ins. After conversion the
//! stand-ins become entities. That leaves the converter's own tags and
//! entities as the only raw `<`, `>` and `&` in the result.

use super::MathRenderer;
use crate::error::MathError;
#[cfg(not(feature = "mathml"))]
use crate::escape::escape_html;

#[cfg(any(feature = "mathml", test))]
const LT: char = '\u{E000}';
#[cfg(any(feature = "mathml", test))]
const GT: char = '\u{E001}';
#[cfg(any(feature = "mathml", test))]
const AMP: char = '\u{E002}';

/// Renderer that converts LaTeX to MathML.
pub struct MathMLRenderer {
    #[cfg(feature = "mathml")]
    _phantom: std::marker::PhantomData<()>,
}

impl MathMLRenderer {
    /// Create a new MathML renderer.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "mathml")]
            _phantom: std::marker::PhantomData,
        }
    }

    #[cfg(feature = "mathml")]
    fn convert(latex: &str, style: latex2mathml::DisplayStyle) -> Result<String, MathError> {
        super::katex::validate(latex)?;
        let source = protect_source(latex)?;
        // Some inputs (`\middle` before a non-operator) hit a panic in the converter.
        let mathml = std::panic::catch_unwind(|| latex2mathml::latex_to_mathml(&source, style))
            .map_err(|_| MathError::Engine("latex2mathml panicked".to_string()))?
            .map_err(|e| MathError::Syntax(e.to_string()))?;
        // The converter reports some failures inline instead of as an error.
        if let Some(start) = mathml.find("[PARSE ERROR") {
            let message = mathml[start..]
                .split(']')
                .next()
                .unwrap_or_default()
                .trim_start_matches('[');
            return Err(MathError::Syntax(message.to_string()));
        }
        Ok(restore_output(&mathml))
    }
}

impl Default for MathMLRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MathRenderer for MathMLRenderer {
    fn render_inline(&self, latex: &str) -> Result<String, MathError> {
        #[cfg(feature = "mathml")]
        {
            Self::convert(latex, latex2mathml::DisplayStyle::Inline)
                .map(|mathml| format!(r#"<span class="math inline">{}</span>"#, mathml))
        }

        #[cfg(not(feature = "mathml"))]
        {
            // Without the mathml feature, fall back to escaped LaTeX
            super::katex::validate(latex)?;
            Ok(format!(
                r#"<span class="math inline">\({}\)</span>"#,
                escape_html(latex)
            ))
        }
    }

    fn render_display(&self, latex: &str) -> Result<String, MathError> {
        #[cfg(feature = "mathml")]
        {
            Self::convert(latex, latex2mathml::DisplayStyle::Block)
                .map(|mathml| format!(r#"<div class="math display">{}</div>"#, mathml))
        }

        #[cfg(not(feature = "mathml"))]
        {
            super::katex::validate(latex)?;
            Ok(format!(
                r#"<div class="math display">\[{}\]</div>"#,
                escape_html(latex)
            ))
        }
    }

    fn head_content(&self) -> Option<String> {
        Some(MATHML_STYLES.to_string())
    }
}

/// Swap markup-significant characters in a formula for private-use stand-ins.
///
/// A bare `&` is left alone: it is the column separator inside environments
/// and never reaches the output as text.
#[cfg(any(feature = "mathml", test))]
fn protect_source(latex: &str) -> Result<String, MathError> {
    if latex.contains([LT, GT, AMP]) {
        return Err(MathError::Syntax("reserved character in formula".to_string()));
    }

    let mut out = String::with_capacity(latex.len());
    let mut rest = latex;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '<' => out.push(LT),
            '>' => out.push(GT),
            '\\' => {
                let name_len = rest
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(rest.len());
                let (symbol, tail) = if name_len == 0 {
                    let len = rest.chars().next().map_or(0, char::len_utf8);
                    rest.split_at(len)
                } else {
                    rest.split_at(name_len)
                };
                match symbol {
                    "lt" => out.push(LT),
                    "gt" => out.push(GT),
                    "&" | "And" => out.push(AMP),
                    _ => {
                        out.push('\\');
                        out.push_str(symbol);
                    }
                }
                rest = tail;
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Turn the stand-ins back into entities and escape any `&` that does not
/// start a character reference.
#[cfg(any(feature = "mathml", test))]
fn restore_output(mathml: &str) -> String {
    // Stand-ins are read as letters; render the comparison signs as operators.
    let mathml = mathml
        .replace(
            &format!(r#"<mi mathvariant="normal">{LT}</mi>"#),
            &format!("<mo>{LT}</mo>"),
        )
        .replace(
            &format!(r#"<mi mathvariant="normal">{GT}</mi>"#),
            &format!("<mo>{GT}</mo>"),
        );

    let mut out = String::with_capacity(mathml.len() + 16);
    for (i, c) in mathml.char_indices() {
        match c {
            LT => out.push_str("&lt;"),
            GT => out.push_str("&gt;"),
            AMP => out.push_str("&amp;"),
            '&' if !starts_reference(&mathml[i + 1..]) => out.push_str("&amp;"),
            c => out.push(c),
        }
    }
    out
}

/// Whether `rest` (the text after a `&`) completes a character reference
/// such as `lang;` or `#x2061;`.
#[cfg(any(feature = "mathml", test))]
fn starts_reference(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let name = &rest[..end];
    match name.strip_prefix('#') {
        Some(num) => match num.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        },
        None => !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

const MATHML_STYLES: &str = r#"<style>
.math.display {
    display: block;
    text-align: center;
    margin: 1em 0;
}
math {
    font-size: 1.1em;
}
</style>"#;
