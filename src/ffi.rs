//! C FFI layer for cross-language interoperability.
//!
//! Every string returned by this module is owned by the caller and must be
//! released with [`mathmark_free_string`].

use crate::config::RenderConfig;
use crate::render::{MathBackend, Renderer};
use libc::{c_char, c_int};
use std::ffi::{CStr, CString};
use std::ptr;

/// Map the C backend code: 0 = KaTeX, 1 = MathJax, 2 = MathML, 3 = KaTeX HTML.
fn backend_from_code(code: c_int) -> MathBackend {
    match code {
        1 => MathBackend::MathJax,
        2 => MathBackend::MathML,
        3 => MathBackend::KaTeXHtml,
        _ => MathBackend::KaTeX,
    }
}

fn into_c_string(s: String) -> *mut c_char {
    // Output is built from a valid C string plus markup, so it holds no NUL.
    match CString::new(s) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

unsafe fn render_raw(input: *const c_char, backend: MathBackend) -> *mut c_char {
    let renderer = Renderer::new(RenderConfig {
        backend,
        ..Default::default()
    });

    if input.is_null() {
        return into_c_string(renderer.render_opt(None));
    }

    match CStr::from_ptr(input).to_str() {
        Ok(input) => into_c_string(renderer.render(input)),
        Err(_) => ptr::null_mut(),
    }
}

/// Render text with embedded math to an HTML fragment using KaTeX.
///
/// A null `input` renders as the empty string. Returns null if `input` is not
/// valid UTF-8.
///
/// # Safety
///
/// - `input` must be null or a valid null-terminated string.
/// - The returned string must be freed with `mathmark_free_string`.
#[no_mangle]
pub unsafe extern "C" fn mathmark_render(input: *const c_char) -> *mut c_char {
    render_raw(input, MathBackend::KaTeX)
}

/// Render with an explicit backend (see `mathmark_render` for the contract).
///
/// Backend codes: 0 = KaTeX, 1 = MathJax, 2 = MathML, 3 = KaTeX HTML.
/// Unknown codes select KaTeX.
///
/// # Safety
///
/// - `input` must be null or a valid null-terminated string.
/// - The returned string must be freed with `mathmark_free_string`.
#[no_mangle]
pub unsafe extern "C" fn mathmark_render_with_backend(
    input: *const c_char,
    backend: c_int,
) -> *mut c_char {
    render_raw(input, backend_from_code(backend))
}

/// Get the head content (styles, scripts) a page needs for a backend.
///
/// Returns null when the backend needs none. A non-null result must be freed
/// with `mathmark_free_string`.
#[no_mangle]
pub extern "C" fn mathmark_head_content(backend: c_int) -> *mut c_char {
    let renderer = Renderer::new(RenderConfig {
        backend: backend_from_code(backend),
        ..Default::default()
    });
    renderer
        .head_content()
        .map(into_c_string)
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by this library.
///
/// # Safety
///
/// `s` must be null or a pointer returned by a `mathmark_*` function, and must
/// not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn mathmark_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the library version as a static string.
#[no_mangle]
pub extern "C" fn mathmark_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
