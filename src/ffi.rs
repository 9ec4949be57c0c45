//! FFI (Foreign Function Interface) layer for C integration
//!
//! C-compatible data structures and functions for embedding the conversion
//! engine in a host program.
//!
//! # FFI Boundary Contract
//!
//! ## String Representation
//!
//! **All strings use UTF-8 bytes + length (NOT NUL-terminated C strings)**
//!
//! Every string field is a `*mut u8` pointer plus a `usize` field with the
//! `_len` suffix holding the exact byte count. C code must use the length
//! field and must never call `strlen()` on these pointers.
//!
//! ## Memory Management
//!
//! - Rust allocates all output memory as `Box<[u8]>`
//! - C must call `html_result_free()` exactly once per result
//! - After the free call every pointer in the result is NULL
//!
//! ```rust
//! use markdown_html_converter::ffi::{
//!     html_convert, html_converter_free, html_converter_new, html_result_free,
//!     HtmlOptions, HtmlResult, ERROR_SUCCESS,
//! };
//!
//! let handle = html_converter_new();
//! let options = HtmlOptions::default();
//! let mut result = HtmlResult::default();
//! let markdown = b"# Hello";
//!
//! unsafe {
//!     html_convert(handle, markdown.as_ptr(), markdown.len(), &options, &mut result);
//! }
//! assert_eq!(result.error_code, ERROR_SUCCESS);
//!
//! let html = unsafe { std::slice::from_raw_parts(result.html, result.html_len) };
//! assert_eq!(html, b"<h1>Hello</h1>");
//!
//! unsafe {
//!     html_result_free(&mut result);
//!     html_converter_free(handle);
//! }
//! assert!(result.html.is_null());
//! ```
//!
//! ## Error Handling Contract
//!
//! **Success:** `error_code = 0`, `error_message = NULL`, `error_len = 0`;
//! `html` holds the output (possibly zero bytes) and `etag` is set when
//! requested.
//!
//! **Error:** `error_code != 0` (see the `ERROR_*` constants),
//! `error_message` holds a UTF-8 description, and every output field is
//! NULL or zero.
//!
//! Panics never cross the boundary: `catch_unwind` turns them into
//! `ERROR_INTERNAL`.
//!
//! ## Thread Safety
//!
//! A handle holds no mutable state. Separate results may be produced from
//! one handle on several threads at once.

use std::panic;
use std::ptr;
use std::slice;

use crate::converter::MarkdownConverter;
use crate::error::ConversionError;
use crate::etag::ETagGenerator;
use crate::options::{ConversionOptions, LineBreakMode};
use crate::stats::stats;

// ============================================================================
// Error Code Constants
// ============================================================================

/// Success - no error occurred
pub const ERROR_SUCCESS: u32 = 0;

/// Input bytes are not valid UTF-8
pub const ERROR_ENCODING: u32 = 2;

/// Invalid input data (NULL pointers)
pub const ERROR_INVALID_INPUT: u32 = 5;

/// An option field holds a value outside its allowed set
pub const ERROR_INVALID_OPTIONS: u32 = 6;

/// Internal error (panic caught)
pub const ERROR_INTERNAL: u32 = 99;

// ============================================================================
// FFI Data Structures
// ============================================================================

/// Conversion options passed from C to Rust
///
/// - `line_breaks`: 0 = standard (paragraphs), 1 = github (hard breaks)
/// - `enable_tables`, `enable_code_blocks`, `enable_emoji`,
///   `sanitize_html`, `generate_etag`: 0 = off, 1 = on
///
/// Any other value is rejected with `ERROR_INVALID_OPTIONS`; nothing is
/// silently coerced.
///
/// ```c
/// html_options_t options = {
///     .line_breaks = 0,
///     .enable_tables = 1,
///     .enable_code_blocks = 1,
///     .enable_emoji = 0,
///     .sanitize_html = 1,
///     .generate_etag = 1
/// };
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HtmlOptions {
    /// Line-break mode: 0=standard, 1=github
    pub line_breaks: u32,
    /// Pipe tables: 0=off, 1=on
    pub enable_tables: u8,
    /// Fenced and inline code: 0=off, 1=on
    pub enable_code_blocks: u8,
    /// Emoji shortcodes: 0=off, 1=on
    pub enable_emoji: u8,
    /// Sanitize intent (no policy applied): 0=off, 1=on
    pub sanitize_html: u8,
    /// Generate an ETag of the output: 0=no, 1=yes
    pub generate_etag: u8,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        let defaults = ConversionOptions::default();
        Self {
            line_breaks: 0,
            enable_tables: u8::from(defaults.enable_tables),
            enable_code_blocks: u8::from(defaults.enable_code_blocks),
            enable_emoji: u8::from(defaults.enable_emoji),
            sanitize_html: u8::from(defaults.sanitize_html),
            generate_etag: 0,
        }
    }
}

fn flag(value: u8, name: &str) -> Result<bool, ConversionError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ConversionError::InvalidOptions(format!(
            "{name} must be 0 or 1, got {other}"
        ))),
    }
}

impl HtmlOptions {
    /// Validate every field and build the Rust options
    pub fn to_conversion_options(&self) -> Result<ConversionOptions, ConversionError> {
        let line_breaks = match self.line_breaks {
            0 => LineBreakMode::Standard,
            1 => LineBreakMode::Github,
            other => {
                return Err(ConversionError::InvalidOptions(format!(
                    "line_breaks must be 0 (standard) or 1 (github), got {other}"
                )));
            }
        };

        Ok(ConversionOptions {
            line_breaks,
            enable_tables: flag(self.enable_tables, "enable_tables")?,
            enable_code_blocks: flag(self.enable_code_blocks, "enable_code_blocks")?,
            enable_emoji: flag(self.enable_emoji, "enable_emoji")?,
            sanitize_html: flag(self.sanitize_html, "sanitize_html")?,
        })
    }
}

/// Conversion result returned from Rust to C
///
/// **All string fields use UTF-8 bytes + length (NOT NUL-terminated)**.
/// Memory is owned by Rust and must be released with `html_result_free()`.
///
/// ```c
/// html_result_t result;
/// html_convert(converter, markdown, markdown_len, &options, &result);
///
/// if (result.error_code == 0) {
///     write_bytes(result.html, result.html_len);
///     log_counts(result.word_count, result.character_count);
/// } else {
///     log_error(result.error_code, result.error_message, result.error_len);
/// }
///
/// html_result_free(&result);
/// ```
#[repr(C)]
#[derive(Debug)]
pub struct HtmlResult {
    /// Output HTML (UTF-8 bytes, NOT NUL-terminated); NULL on error
    pub html: *mut u8,
    /// Length of html in bytes
    pub html_len: usize,
    /// ETag string (UTF-8 bytes); NULL if not requested or on error
    pub etag: *mut u8,
    /// Length of etag in bytes
    pub etag_len: usize,
    /// Words in the raw input; 0 on error
    pub word_count: u64,
    /// Unicode scalar values in the raw input; 0 on error
    pub character_count: u64,
    /// Error code: 0=success, non-zero=error (see ERROR_* constants)
    pub error_code: u32,
    /// Error message (UTF-8 bytes); NULL on success
    pub error_message: *mut u8,
    /// Length of error message in bytes
    pub error_len: usize,
}

impl Default for HtmlResult {
    fn default() -> Self {
        Self {
            html: ptr::null_mut(),
            html_len: 0,
            etag: ptr::null_mut(),
            etag_len: 0,
            word_count: 0,
            character_count: 0,
            error_code: ERROR_SUCCESS,
            error_message: ptr::null_mut(),
            error_len: 0,
        }
    }
}

/// Opaque handle to a converter instance
pub struct HtmlConverterHandle {
    etag_generator: ETagGenerator,
}

#[derive(Debug)]
struct ConversionOutput {
    html: Box<[u8]>,
    etag: Option<Box<[u8]>>,
    word_count: u64,
    character_count: u64,
}

fn set_error_result(result: &mut HtmlResult, error_code: u32, error_message: String) {
    let error_bytes = error_message.into_bytes().into_boxed_slice();
    result.error_code = error_code;
    result.error_len = error_bytes.len();
    result.error_message = Box::into_raw(error_bytes) as *mut u8;
}

fn set_success_result(result: &mut HtmlResult, output: ConversionOutput) {
    result.html_len = output.html.len();
    result.html = Box::into_raw(output.html) as *mut u8;
    result.word_count = output.word_count;
    result.character_count = output.character_count;

    if let Some(etag_bytes) = output.etag {
        result.etag_len = etag_bytes.len();
        result.etag = Box::into_raw(etag_bytes) as *mut u8;
    }
}

fn required_ref<'a, T>(ptr: *const T, name: &str) -> Result<&'a T, ConversionError> {
    if ptr.is_null() {
        return Err(ConversionError::InvalidInput(format!("{name} pointer is NULL")));
    }

    // SAFETY: Caller provided a non-NULL pointer and accepts the FFI contract
    // that it points to a valid, properly aligned value.
    Ok(unsafe { &*ptr })
}

fn required_bytes<'a>(ptr: *const u8, len: usize, name: &str) -> Result<&'a [u8], ConversionError> {
    if len == 0 {
        return Ok(&[]);
    }

    if ptr.is_null() {
        return Err(ConversionError::InvalidInput(format!("{name} pointer is NULL")));
    }

    // SAFETY: Pointer was validated as non-NULL above; caller guarantees `len`
    // bytes are valid and readable for the duration of this call.
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

fn convert_inner(
    handle_ref: &HtmlConverterHandle,
    markdown_bytes: &[u8],
    options_ref: &HtmlOptions,
) -> Result<ConversionOutput, ConversionError> {
    let options = options_ref.to_conversion_options()?;
    let generate_etag = flag(options_ref.generate_etag, "generate_etag")?;
    let markdown = std::str::from_utf8(markdown_bytes)
        .map_err(|e| ConversionError::EncodingError(format!("input is not valid UTF-8: {e}")))?;

    let html = MarkdownConverter::with_options(options).convert(markdown);
    let counts = stats(markdown);

    let html_bytes = html.into_bytes().into_boxed_slice();
    let etag_bytes = generate_etag.then(|| {
        handle_ref
            .etag_generator
            .generate(html_bytes.as_ref())
            .into_bytes()
            .into_boxed_slice()
    });

    Ok(ConversionOutput {
        html: html_bytes,
        etag: etag_bytes,
        word_count: counts.word_count as u64,
        character_count: counts.character_count as u64,
    })
}

fn free_buffer(ptr_field: &mut *mut u8, len_field: &mut usize) {
    if (*ptr_field).is_null() {
        return;
    }

    let raw = ptr::slice_from_raw_parts_mut(*ptr_field, *len_field);
    // SAFETY: `raw` was allocated by `Box<[u8]>` via `Box::into_raw`.
    let _ = unsafe { Box::from_raw(raw) };
    *ptr_field = ptr::null_mut();
    *len_field = 0;
}

// ============================================================================
// FFI Functions
// ============================================================================

/// Create a converter handle
///
/// Returns NULL if initialization fails. The handle must be released with
/// `html_converter_free()`.
#[unsafe(no_mangle)]
pub extern "C" fn html_converter_new() -> *mut HtmlConverterHandle {
    let result = panic::catch_unwind(|| {
        Box::into_raw(Box::new(HtmlConverterHandle {
            etag_generator: ETagGenerator::new(),
        }))
    });

    result.unwrap_or(ptr::null_mut())
}

/// Convert Markdown bytes to HTML
///
/// `generate_etag` in `options` controls whether `result.etag` is filled.
/// `markdown` may be NULL only when `markdown_len` is 0.
///
/// # Safety
///
/// - `handle` must come from `html_converter_new()` and not yet be freed
/// - `markdown` must point to `markdown_len` readable bytes
/// - `options` must point to a valid `HtmlOptions`
/// - `result` must point to writable memory for an `HtmlResult`; any
///   previous contents are overwritten without being freed
#[unsafe(no_mangle)]
pub unsafe extern "C" fn html_convert(
    handle: *const HtmlConverterHandle,
    markdown: *const u8,
    markdown_len: usize,
    options: *const HtmlOptions,
    result: *mut HtmlResult,
) {
    if result.is_null() {
        // Nowhere to report the error
        return;
    }

    // SAFETY: `result` was validated as non-NULL above. Writing a fresh value
    // avoids reading whatever the caller left in that memory.
    unsafe { result.write(HtmlResult::default()) };
    // SAFETY: just initialized.
    let result_ref = unsafe { &mut *result };

    let panic_result = panic::catch_unwind(|| -> Result<ConversionOutput, ConversionError> {
        let handle_ref = required_ref(handle, "Converter handle")?;
        let options_ref = required_ref(options, "Options")?;
        let markdown_slice = required_bytes(markdown, markdown_len, "Markdown")?;
        convert_inner(handle_ref, markdown_slice, options_ref)
    });

    match panic_result {
        Ok(Ok(output)) => set_success_result(result_ref, output),
        Ok(Err(e)) => set_error_result(result_ref, e.code(), e.to_string()),
        Err(_) => set_error_result(
            result_ref,
            ERROR_INTERNAL,
            "Internal panic during conversion".to_string(),
        ),
    }
}

/// Release every buffer held by a result
///
/// Safe to call twice; the second call finds only NULL pointers.
///
/// # Safety
///
/// `result` must be NULL or point to an `HtmlResult` filled by
/// `html_convert()`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn html_result_free(result: *mut HtmlResult) {
    if result.is_null() {
        return;
    }

    // SAFETY: `result` was validated as non-NULL above.
    let result_ref = unsafe { &mut *result };
    free_buffer(&mut result_ref.html, &mut result_ref.html_len);
    free_buffer(&mut result_ref.etag, &mut result_ref.etag_len);
    free_buffer(&mut result_ref.error_message, &mut result_ref.error_len);
    result_ref.word_count = 0;
    result_ref.character_count = 0;
    result_ref.error_code = ERROR_SUCCESS;
}

/// Destroy a converter handle
///
/// # Safety
///
/// `handle` must be NULL or come from `html_converter_new()`, and must not
/// be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn html_converter_free(handle: *mut HtmlConverterHandle) {
    if handle.is_null() {
        return;
    }

    // SAFETY: `handle` is non-NULL and was created by `Box::into_raw` in
    // `html_converter_new`.
    unsafe { drop(Box::from_raw(handle)) };
}
