//! Property tests for the escaping and math-span guarantees of `render`.

use mathmark::{
    escape_html, render, MathBackend, MathError, MathRenderer, RenderConfig, Renderer,
};
use proptest::prelude::*;

/// Expected output for input that contains no `$`.
fn escaped_with_breaks(input: &str) -> String {
    let mut out = String::new();
    let mut lines = input.split('\n').peekable();
    while let Some(line) = lines.next() {
        let line = escape_html(line);
        if lines.peek().is_some() {
            out.push_str(line.strip_suffix('\r').unwrap_or(&line));
            out.push_str("<br>");
        } else {
            out.push_str(&line);
        }
    }
    out
}

/// Engine that wraps formulas in a marker element with no `<`, `>` or `&` of
/// its own besides the wrapper tags.
struct MarkerRenderer;

impl MathRenderer for MarkerRenderer {
    fn render_inline(&self, latex: &str) -> Result<String, MathError> {
        Ok(format!("<m>{}</m>", escape_html(latex)))
    }

    fn render_display(&self, latex: &str) -> Result<String, MathError> {
        Ok(format!("<M>{}</M>", escape_html(latex)))
    }

    fn head_content(&self) -> Option<String> {
        None
    }
}

const EMPTY_INLINE: &str = r#"<span class="math inline"></span>"#;
const EMPTY_DISPLAY: &str = r#"<div class="math display"></div>"#;

/// Remove generated markup, leaving only literal text.
fn strip_generated(html: &str) -> String {
    let html = html
        .replace("<br>", "")
        .replace(EMPTY_INLINE, "")
        .replace(EMPTY_DISPLAY, "");
    let mut out = String::new();
    let mut rest = html.as_str();

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let close = if tail.starts_with("<m>") {
            "</m>"
        } else if tail.starts_with("<M>") {
            "</M>"
        } else {
            // Not generated: keep it so the assertion below sees it.
            out.push_str(tail);
            return out;
        };
        match tail.find(close) {
            Some(end) => rest = &tail[end + close.len()..],
            None => {
                out.push_str(tail);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Backends whose real output is checked for stray markup.
fn backends() -> Vec<MathBackend> {
    vec![MathBackend::KaTeX, MathBackend::MathJax, MathBackend::MathML]
}

fn renderer_for(backend: MathBackend) -> Renderer {
    Renderer::new(RenderConfig {
        backend,
        ..Default::default()
    })
}

/// Element names user text must never be able to produce.
const INJECTED_TAGS: &[&str] = &["script", "img", "b", "iframe", "style"];

/// Check that every `<` in `html` opens a well-formed tag, that no `>` appears
/// outside a tag, and that every `&` starts a character reference.
fn check_markup(html: &str) -> Result<(), String> {
    let mut rest = html;
    while let Some(c) = rest.chars().next() {
        match c {
            '<' => {
                let tag_end = rest
                    .find('>')
                    .ok_or_else(|| format!("unterminated tag at {rest:?}"))?;
                let tag = &rest[1..tag_end];
                if tag.contains('<') {
                    return Err(format!("raw `<` at {rest:?}"));
                }
                let name = tag.strip_prefix('/').unwrap_or(tag);
                let name_len = name
                    .find(|c: char| !c.is_ascii_alphanumeric())
                    .unwrap_or(name.len());
                let name = &name[..name_len];
                if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
                    return Err(format!("raw `<` at {rest:?}"));
                }
                if INJECTED_TAGS.contains(&name.to_ascii_lowercase().as_str()) {
                    return Err(format!("injected <{name}> in {html:?}"));
                }
                rest = &rest[tag_end + 1..];
            }
            '>' => return Err(format!("raw `>` at {rest:?}")),
            '&' => {
                let reference = rest[1..]
                    .split_once(';')
                    .map(|(name, _)| name)
                    .filter(|name| {
                        let name = name.strip_prefix('#').unwrap_or(name);
                        let name = name.strip_prefix(['x', 'X']).unwrap_or(name);
                        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
                    });
                if reference.is_none() {
                    return Err(format!("raw `&` at {rest:?}"));
                }
                rest = &rest[1..];
            }
            c => rest = &rest[c.len_utf8()..],
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn no_dollar_input_is_escaped_text(input in "[^$]{0,200}") {
        prop_assert_eq!(render(&input), escaped_with_breaks(&input));
    }

    #[test]
    fn no_raw_angle_brackets_leak(input in "[a-z<>&$ \n]{0,120}") {
        let renderer =
            Renderer::with_math_renderer(RenderConfig::default(), Box::new(MarkerRenderer));
        let literal = strip_generated(&renderer.render(&input));
        prop_assert!(!literal.contains('<'));
        prop_assert!(!literal.contains('>'));
    }

    #[test]
    fn ampersands_escaped_exactly_once(input in "[a-z&; \n]{0,120}") {
        let html = render(&input);
        let raw_amps = input.matches('&').count();
        prop_assert_eq!(html.matches("&amp;").count(), raw_amps);
        prop_assert_eq!(html.matches('&').count(), raw_amps);
    }

    #[test]
    fn render_never_panics(input in "\\PC{0,200}") {
        let _ = render(&input);
    }

    #[test]
    fn backend_output_is_well_formed(input in "[a-z<>&$\\\\{} \n]{0,80}") {
        for backend in backends() {
            let html = renderer_for(backend).render(&input);
            if let Err(problem) = check_markup(&html) {
                return Err(TestCaseError::fail(format!("{backend}: {problem}")));
            }
        }
    }

    #[test]
    fn lone_dollar_stays_literal(prefix in "[a-z ]{0,20}", suffix in "[a-z0-9 ]{0,20}") {
        let input = format!("{prefix}${suffix}");
        prop_assert_eq!(render(&input), input);
    }
}

#[test]
fn plain_text_round_trip() {
    assert_eq!(render("plain text"), "plain text");
    assert_eq!(render("a < b"), "a &lt; b");
}

#[test]
fn block_math_has_no_delimiters() {
    let html = render("$$x=1$$");
    assert!(html.contains("math display"));
    assert!(!html.contains("$$"));
}

#[test]
fn inline_math_between_text() {
    let html = render("E=$mc^2$ done");
    assert!(html.starts_with("E="));
    assert!(html.contains(r#"<span class="math inline">\(mc^2\)</span>"#));
    assert!(html.ends_with(" done"));
}

#[test]
fn malformed_math_keeps_formula_text() {
    let html = render("$$\\invalidcmd$$");
    assert!(html.contains("\\invalidcmd"));

    let html = render("$$\\frac{a}{b$$");
    assert_eq!(html, "$$\\frac{a}{b$$");
}

#[test]
fn mixed_block_and_inline() {
    let html = render("$$a=1$$ and $b=2$");
    assert!(html.contains(r#"<div class="math display">\[a=1\]</div>"#));
    assert!(html.contains(r#"<span class="math inline">\(b=2\)</span>"#));
    assert!(html.contains(" and "));
}

#[test]
fn multiline_block_is_one_formula() {
    let html = render("$$\nx=1\ny=2\n$$");
    assert_eq!(html.matches("math display").count(), 1);
    assert!(!html.contains("<br>"));
}

#[test]
fn unmatched_dollar_is_literal() {
    assert_eq!(render("price is $5 only"), "price is $5 only");
}

#[test]
fn concurrent_rendering() {
    let renderer = std::sync::Arc::new(Renderer::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = std::sync::Arc::clone(&renderer);
            std::thread::spawn(move || renderer.render(&format!("${i}$ < {i}")))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let html = handle.join().unwrap();
        assert_eq!(
            html,
            format!(r#"<span class="math inline">\({i}\)</span> &lt; {i}"#)
        );
    }
}

#[test]
fn markup_characters_in_formulas_stay_escaped() {
    let inputs = [
        "$a<b$",
        "$$x > 0$$",
        "$a \\& b$",
        "$x \\lt y \\gt z$",
        "$a & b$",
        "$\\text{<script>alert(1)</script>}$",
        "$$\\text{</math><b>x</b>}$$",
        "$\\mathrm{<img src=x onerror=alert(1)>}$",
        "$$\\begin{pmatrix} a & b \\\\ c & d \\end{pmatrix}$$",
        "$x \\) <b>y</b> \\($",
        "&lt;$1<2$&gt; & <i>",
    ];

    #[cfg_attr(not(feature = "server-katex"), allow(unused_mut))]
    let mut backends = backends();
    #[cfg(feature = "server-katex")]
    backends.push(MathBackend::KaTeXHtml);

    for backend in backends {
        let renderer = renderer_for(backend);
        for input in inputs {
            let html = renderer.render(input);
            if let Err(problem) = check_markup(&html) {
                panic!("{backend} rendering {input:?}: {problem}");
            }
        }
    }
}

#[test]
fn markup_check_flags_raw_characters() {
    assert!(check_markup(r#"<span class="math inline">\(a &lt; b\)</span>"#).is_ok());
    assert!(check_markup("<math><mo>&lang;</mo></math><br>").is_ok());
    assert!(check_markup("<mo><</mo>").is_err());
    assert!(check_markup("<mo>></mo>").is_err());
    assert!(check_markup("<mi>&</mi>").is_err());
    assert!(check_markup("<mtext><script>x</script></mtext>").is_err());
}
