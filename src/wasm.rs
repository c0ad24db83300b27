//! WebAssembly bindings for JavaScript/TypeScript.

#![cfg(feature = "wasm")]

use crate::config::RenderConfig;
use crate::render::{MathBackend, Renderer};
use wasm_bindgen::prelude::*;

/// Render text with embedded math to a safe HTML fragment.
///
/// # Arguments
///
/// * `input` - The raw text; `undefined` or `null` renders as `""`.
/// * `options` - Optional configuration object.
///
/// # Returns
///
/// The rendered HTML string, ready for a trusted-HTML binding.
#[wasm_bindgen(js_name = renderMath)]
pub fn render_math(input: Option<String>, options: Option<RenderOptions>) -> String {
    let config = options.map(|o| o.to_render_config()).unwrap_or_default();
    Renderer::new(config).render_opt(input.as_deref())
}

/// Configuration options for rendering.
#[wasm_bindgen]
pub struct RenderOptions {
    math_backend: MathBackend,
    line_break: Option<String>,
}

#[wasm_bindgen]
impl RenderOptions {
    /// Create a new options object with defaults.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            math_backend: MathBackend::KaTeX,
            line_break: None,
        }
    }

    /// Set the math rendering backend: "katex", "mathjax", "mathml" or "katex-html".
    #[wasm_bindgen(js_name = setMathBackend)]
    pub fn set_math_backend(&mut self, backend: &str) -> Result<(), JsError> {
        self.math_backend = backend
            .parse()
            .map_err(|e: crate::error::ConfigError| JsError::new(&e.to_string()))?;
        Ok(())
    }

    /// Set the markup emitted for each newline.
    #[wasm_bindgen(js_name = setLineBreak)]
    pub fn set_line_break(&mut self, markup: &str) {
        self.line_break = Some(markup.to_string());
    }

    /// Head content (styles, scripts) the page needs for the chosen backend.
    #[wasm_bindgen(js_name = headContent)]
    pub fn head_content(&self) -> Option<String> {
        Renderer::new(self.to_render_config()).head_content()
    }

    fn to_render_config(&self) -> RenderConfig {
        let mut config = RenderConfig {
            backend: self.math_backend,
            ..Default::default()
        };
        if let Some(line_break) = &self.line_break {
            config.line_break = line_break.clone();
        }
        config
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// TypeScript type definitions for documentation
/// ```typescript
/// // mathmark.d.ts
///
/// /**
///  * Render text with embedded math to a safe HTML fragment.
///  * @param input - The raw text
///  * @param options - Optional configuration
///  * @returns The rendered HTML string
///  */
/// export function renderMath(input?: string | null, options?: RenderOptions): string;
///
/// /**
///  * Get the library version.
///  * @returns Version string
///  */
/// export function getVersion(): string;
///
/// /**
///  * Configuration options for rendering.
///  */
/// export class RenderOptions {
///     constructor();
///     setMathBackend(backend: "katex" | "mathjax" | "mathml" | "katex-html"): void;
///     setLineBreak(markup: string): void;
///     headContent(): string | undefined;
/// }
/// ```
const _: () = ();
