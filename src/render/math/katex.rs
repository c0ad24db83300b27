//! KaTeX/MathJax passthrough renderer.

use super::MathRenderer;
use crate::error::MathError;
use crate::escape::escape_html;

/// Renderer that outputs escaped LaTeX for client-side rendering.
///
/// The formula is checked for structural problems a browser-side engine would
/// choke on (unbalanced braces, a dangling backslash, mismatched
/// `\begin`/`\end`), so such spans stay plain text instead of showing a
/// half-rendered error box.
pub struct KaTeXRenderer {
    use_mathjax: bool,
}

impl KaTeXRenderer {
    /// Create a new KaTeX renderer.
    pub fn new() -> Self {
        Self { use_mathjax: false }
    }

    /// Create a renderer configured for MathJax.
    pub fn new_mathjax() -> Self {
        Self { use_mathjax: true }
    }
}

impl Default for KaTeXRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MathRenderer for KaTeXRenderer {
    fn render_inline(&self, latex: &str) -> Result<String, MathError> {
        validate(latex)?;
        Ok(format!(
            r#"<span class="math inline">\({}\)</span>"#,
            escape_html(latex)
        ))
    }

    fn render_display(&self, latex: &str) -> Result<String, MathError> {
        validate(latex)?;
        Ok(format!(
            r#"<div class="math display">\[{}\]</div>"#,
            escape_html(latex)
        ))
    }

    fn head_content(&self) -> Option<String> {
        if self.use_mathjax {
            Some(MATHJAX_HEAD.to_string())
        } else {
            Some(KATEX_HEAD.to_string())
        }
    }
}

/// Structural check of a LaTeX formula.
pub(crate) fn validate(latex: &str) -> Result<(), MathError> {
    let mut depth: usize = 0;
    let mut environments: Vec<&str> = Vec::new();
    let mut rest = latex;

    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| MathError::Syntax("unexpected `}`".to_string()))?;
            }
            '\\' => {
                let name_len = rest
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(rest.len());
                if name_len == 0 {
                    // Control symbol such as `\{` or `\\`: skip the escaped character.
                    let escaped = rest
                        .chars()
                        .next()
                        .ok_or_else(|| MathError::Syntax("dangling `\\`".to_string()))?;
                    // Math-mode delimiters would end the client-side span early.
                    if matches!(escaped, '(' | ')' | '[' | ']') {
                        return Err(MathError::Syntax(format!(
                            "math delimiter `\\{escaped}` inside formula"
                        )));
                    }
                    rest = &rest[escaped.len_utf8()..];
                    continue;
                }
                let name = &rest[..name_len];
                rest = &rest[name_len..];
                if name == "begin" || name == "end" {
                    let (env, after) = environment_name(rest)
                        .ok_or_else(|| MathError::Syntax(format!("malformed `\\{}`", name)))?;
                    rest = after;
                    if name == "begin" {
                        environments.push(env);
                    } else {
                        match environments.pop() {
                            Some(open) if open == env => {}
                            Some(open) => {
                                return Err(MathError::Syntax(format!(
                                    "`\\end{{{}}}` does not match `\\begin{{{}}}`",
                                    env, open
                                )))
                            }
                            None => {
                                return Err(MathError::Syntax(format!(
                                    "`\\end{{{}}}` without `\\begin`",
                                    env
                                )))
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(MathError::Syntax("unclosed `{`".to_string()));
    }
    if let Some(open) = environments.pop() {
        return Err(MathError::Syntax(format!("unclosed `\\begin{{{}}}`", open)));
    }
    Ok(())
}

/// Parse `{name}` (after optional spaces), returning the name and the rest.
fn environment_name(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start_matches(' ').strip_prefix('{')?;
    let close = input.find('}')?;
    let name = input[..close].trim();
    if name.is_empty() || name.contains('{') {
        return None;
    }
    Some((name, &input[close + 1..]))
}

const KATEX_HEAD: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css" crossorigin="anonymous">
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.js" crossorigin="anonymous"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/contrib/mhchem.min.js" crossorigin="anonymous"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/contrib/auto-render.min.js" crossorigin="anonymous"
    onload="document.querySelectorAll('.math').forEach(function (el) {
        renderMathInElement(el, {
            delimiters: [
                {left: '\\[', right: '\\]', display: true},
                {left: '\\(', right: '\\)', display: false}
            ]
        });
    });"></script>"#;

const MATHJAX_HEAD: &str = r#"<script>
MathJax = {
    loader: {load: ['[tex]/mhchem']},
    tex: {
        packages: {'[+]': ['mhchem']},
        inlineMath: [['\\(', '\\)']],
        displayMath: [['\\[', '\\]']]
    },
    options: {
        ignoreHtmlClass: '.*|',
        processHtmlClass: 'math'
    }
};
</script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_math() {
        let renderer = KaTeXRenderer::new();
        let result = renderer.render_inline("E = mc^2").unwrap();
        assert_eq!(result, r#"<span class="math inline">\(E = mc^2\)</span>"#);
    }

    #[test]
    fn test_display_math() {
        let renderer = KaTeXRenderer::new();
        let result = renderer.render_display("\\int_0^1 x dx").unwrap();
        assert!(result.contains("math display"));
        assert!(result.contains(r"\[\int_0^1 x dx\]"));
    }

    #[test]
    fn test_escaping() {
        let renderer = KaTeXRenderer::new();
        let result = renderer.render_inline("a < b & c").unwrap();
        assert!(result.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_unknown_command_passes_through() {
        let renderer = KaTeXRenderer::new();
        let result = renderer.render_display("\\invalidcmd").unwrap();
        assert!(result.contains("\\invalidcmd"));
    }

    #[test]
    fn test_validate_braces() {
        assert!(validate("\\frac{1}{2}").is_ok());
        assert!(validate("\\{ x \\}").is_ok());
        assert_eq!(
            validate("\\frac{1}{2"),
            Err(MathError::Syntax("unclosed `{`".to_string()))
        );
        assert_eq!(
            validate("x}"),
            Err(MathError::Syntax("unexpected `}`".to_string()))
        );
    }

    #[test]
    fn test_validate_dangling_backslash() {
        assert!(validate("x \\").is_err());
        assert!(validate("a \\\\ b").is_ok());
    }

    #[test]
    fn test_validate_environments() {
        assert!(validate("\\begin{pmatrix} 1 & 0 \\\\ 0 & 1 \\end{pmatrix}").is_ok());
        assert!(validate("\\begin{cases} x \\end{pmatrix}").is_err());
        assert!(validate("\\begin{aligned} x").is_err());
        assert!(validate("x \\end{aligned}").is_err());
        assert!(validate("\\begin x").is_err());
    }

    #[test]
    fn test_validate_rejects_math_delimiters() {
        for latex in ["a \\) b", "x \\] y", "\\( x", "\\[ x"] {
            assert!(
                matches!(validate(latex), Err(MathError::Syntax(_))),
                "{latex}"
            );
        }
        assert!(validate("\\left( x \\right)").is_ok());
        assert!(validate("a \\\\[2pt] b").is_ok());
    }

    #[test]
    fn test_delimiter_in_source_is_rejected() {
        let renderer = KaTeXRenderer::new();
        assert!(renderer.render_inline("x \\) <b>y</b> \\(").is_err());
        assert!(renderer.render_display("a \\] b").is_err());
    }

    #[test]
    fn test_head_content_scoped_to_math_elements() {
        assert!(KaTeXRenderer::new()
            .head_content()
            .unwrap()
            .contains("querySelectorAll('.math')"));
        assert!(KaTeXRenderer::new_mathjax()
            .head_content()
            .unwrap()
            .contains("processHtmlClass: 'math'"));
    }

    #[test]
    fn test_head_content() {
        assert!(KaTeXRenderer::new().head_content().unwrap().contains("katex"));
        assert!(KaTeXRenderer::new_mathjax()
            .head_content()
            .unwrap()
            .contains("MathJax"));
    }
}
