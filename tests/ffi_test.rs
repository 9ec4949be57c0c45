//! FFI integration tests
//!
//! These tests verify that the FFI functions work correctly and handle
//! memory management properly.

use markdown_html_converter::ffi::*;
use proptest::prelude::*;
use std::ptr;
use std::slice;

fn ffi_html_convert(
    handle: *const HtmlConverterHandle,
    markdown: *const u8,
    markdown_len: usize,
    options: *const HtmlOptions,
    result: *mut HtmlResult,
) {
    unsafe { markdown_html_converter::ffi::html_convert(handle, markdown, markdown_len, options, result) }
}

fn ffi_html_result_free(result: *mut HtmlResult) {
    unsafe { markdown_html_converter::ffi::html_result_free(result) }
}

fn ffi_html_converter_free(handle: *mut HtmlConverterHandle) {
    unsafe { markdown_html_converter::ffi::html_converter_free(handle) }
}

fn bytes<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if len == 0 {
        return &[];
    }
    unsafe { slice::from_raw_parts(ptr, len) }
}

/// Convert `markdown` through the C ABI and return (error_code, html, etag, message)
fn convert_via_ffi(markdown: &[u8], options: &HtmlOptions) -> (u32, String, Option<String>, String) {
    let converter = html_converter_new();
    assert!(!converter.is_null());

    let mut result = HtmlResult::default();
    ffi_html_convert(converter, markdown.as_ptr(), markdown.len(), options, &mut result);

    let html = String::from_utf8(bytes(result.html, result.html_len).to_vec()).unwrap();
    let etag = (!result.etag.is_null())
        .then(|| String::from_utf8(bytes(result.etag, result.etag_len).to_vec()).unwrap());
    let message =
        String::from_utf8(bytes(result.error_message, result.error_len).to_vec()).unwrap();
    let code = result.error_code;

    ffi_html_result_free(&mut result);
    ffi_html_converter_free(converter);
    (code, html, etag, message)
}

#[test]
fn test_converter_lifecycle() {
    let converter = html_converter_new();
    assert!(!converter.is_null(), "Converter should not be NULL");
    ffi_html_converter_free(converter);
}

#[test]
fn test_basic_conversion() {
    let converter = html_converter_new();
    let markdown = b"# Hello World\n\nThis is a **test**.";
    let options = HtmlOptions::default();
    let mut result = HtmlResult::default();

    ffi_html_convert(converter, markdown.as_ptr(), markdown.len(), &options, &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert!(result.error_message.is_null());
    assert_eq!(result.error_len, 0);
    assert_eq!(
        bytes(result.html, result.html_len),
        b"<h1>Hello World</h1>\n<p>This is a <strong>test</strong>.</p>"
    );
    assert_eq!(result.word_count, 7);
    assert_eq!(result.character_count, markdown.len() as u64);
    assert!(result.etag.is_null());

    ffi_html_result_free(&mut result);
    ffi_html_converter_free(converter);
}

#[test]
fn test_etag_generation() {
    let options = HtmlOptions {
        generate_etag: 1,
        ..Default::default()
    };
    let (code, html, etag, _) = convert_via_ffi(b"# Title", &options);

    assert_eq!(code, ERROR_SUCCESS);
    assert_eq!(html, "<h1>Title</h1>");
    let etag = etag.expect("ETag requested");
    assert_eq!(etag.len(), 34);
    assert!(etag.starts_with('"') && etag.ends_with('"'));
}

#[test]
fn test_github_line_breaks() {
    let options = HtmlOptions {
        line_breaks: 1,
        ..Default::default()
    };
    let (code, html, _, _) = convert_via_ffi(b"a\nb", &options);
    assert_eq!(code, ERROR_SUCCESS);
    assert_eq!(html, "a<br>\nb");
}

#[test]
fn test_empty_input_succeeds_with_empty_html() {
    let converter = html_converter_new();
    let options = HtmlOptions::default();
    let mut result = HtmlResult::default();

    ffi_html_convert(converter, ptr::null(), 0, &options, &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert_eq!(result.html_len, 0);
    assert_eq!(result.word_count, 0);

    ffi_html_result_free(&mut result);
    ffi_html_converter_free(converter);
}

#[test]
fn test_null_markdown_with_length_is_invalid_input() {
    let converter = html_converter_new();
    let options = HtmlOptions::default();
    let mut result = HtmlResult::default();

    ffi_html_convert(converter, ptr::null(), 10, &options, &mut result);

    assert_eq!(result.error_code, ERROR_INVALID_INPUT);
    assert!(result.html.is_null());
    assert!(!result.error_message.is_null());

    ffi_html_result_free(&mut result);
    ffi_html_converter_free(converter);
}

#[test]
fn test_null_handle_and_options() {
    let markdown = b"text";
    let options = HtmlOptions::default();
    let mut result = HtmlResult::default();

    ffi_html_convert(ptr::null(), markdown.as_ptr(), markdown.len(), &options, &mut result);
    assert_eq!(result.error_code, ERROR_INVALID_INPUT);
    ffi_html_result_free(&mut result);

    let converter = html_converter_new();
    ffi_html_convert(converter, markdown.as_ptr(), markdown.len(), ptr::null(), &mut result);
    assert_eq!(result.error_code, ERROR_INVALID_INPUT);
    ffi_html_result_free(&mut result);
    ffi_html_converter_free(converter);
}

#[test]
fn test_null_result_is_ignored() {
    let converter = html_converter_new();
    let markdown = b"text";
    let options = HtmlOptions::default();

    // Must return without touching anything
    ffi_html_convert(converter, markdown.as_ptr(), markdown.len(), &options, ptr::null_mut());
    ffi_html_converter_free(converter);
}

#[test]
fn test_invalid_utf8_is_encoding_error() {
    let (code, html, etag, message) = convert_via_ffi(&[b'#', b' ', 0xC3, 0x28], &HtmlOptions::default());
    assert_eq!(code, ERROR_ENCODING);
    assert!(html.is_empty());
    assert!(etag.is_none());
    assert!(message.contains("UTF-8"));
}

#[test]
fn test_invalid_option_values() {
    let cases = [
        HtmlOptions {
            line_breaks: 2,
            ..Default::default()
        },
        HtmlOptions {
            enable_tables: 255,
            ..Default::default()
        },
        HtmlOptions {
            sanitize_html: 3,
            ..Default::default()
        },
        HtmlOptions {
            generate_etag: 2,
            ..Default::default()
        },
    ];

    for options in cases {
        let (code, html, _, message) = convert_via_ffi(b"# x", &options);
        assert_eq!(code, ERROR_INVALID_OPTIONS);
        assert!(html.is_empty());
        assert!(message.starts_with("Invalid options"));
    }
}

#[test]
fn test_double_free_is_safe() {
    let converter = html_converter_new();
    let markdown = b"text";
    let options = HtmlOptions::default();
    let mut result = HtmlResult::default();

    ffi_html_convert(converter, markdown.as_ptr(), markdown.len(), &options, &mut result);
    ffi_html_result_free(&mut result);
    ffi_html_result_free(&mut result);
    assert!(result.html.is_null());

    ffi_html_result_free(ptr::null_mut());
    ffi_html_converter_free(converter);
    ffi_html_converter_free(ptr::null_mut());
}

#[test]
fn test_handle_is_reusable() {
    let converter = html_converter_new();
    let options = HtmlOptions::default();

    for markdown in ["# one", "* two", "three"] {
        let mut result = HtmlResult::default();
        ffi_html_convert(converter, markdown.as_ptr(), markdown.len(), &options, &mut result);
        assert_eq!(result.error_code, ERROR_SUCCESS);
        assert!(result.html_len > 0);
        ffi_html_result_free(&mut result);
    }

    ffi_html_converter_free(converter);
}

proptest! {
    #[test]
    fn prop_ffi_matches_rust_api(markdown in "[a-z#*`|> \n-]{0,200}") {
        let (code, html, _, _) = convert_via_ffi(markdown.as_bytes(), &HtmlOptions::default());
        prop_assert_eq!(code, ERROR_SUCCESS);
        prop_assert_eq!(
            html,
            markdown_html_converter::convert(
                &markdown,
                &markdown_html_converter::ConversionOptions::default()
            )
        );
    }

    #[test]
    fn prop_arbitrary_bytes_never_crash(input in prop::collection::vec(any::<u8>(), 0..512)) {
        let (code, _, _, _) = convert_via_ffi(&input, &HtmlOptions::default());
        prop_assert!(code == ERROR_SUCCESS || code == ERROR_ENCODING);
    }
}
