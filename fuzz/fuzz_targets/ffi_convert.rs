#![no_main]

use libfuzzer_sys::fuzz_target;
use markdown_html_converter::ffi::{
    ERROR_ENCODING, ERROR_INVALID_OPTIONS, ERROR_SUCCESS, HtmlOptions, HtmlResult, html_convert,
    html_converter_free, html_converter_new, html_result_free,
};

fuzz_target!(|data: &[u8]| {
    let Some((header, markdown)) = data.split_first_chunk::<6>() else {
        return;
    };

    // Raw bytes, so out-of-range option values are exercised too
    let options = HtmlOptions {
        line_breaks: u32::from(header[0] % 3),
        enable_tables: header[1] % 3,
        enable_code_blocks: header[2] % 3,
        enable_emoji: header[3] % 3,
        sanitize_html: header[4] % 3,
        generate_etag: header[5] & 1,
    };

    let handle = html_converter_new();
    let mut result = HtmlResult::default();
    unsafe {
        html_convert(handle, markdown.as_ptr(), markdown.len(), &options, &mut result);
    }

    assert!(matches!(
        result.error_code,
        ERROR_SUCCESS | ERROR_ENCODING | ERROR_INVALID_OPTIONS
    ));
    if result.error_code != ERROR_SUCCESS {
        assert!(result.html.is_null());
    }

    unsafe {
        html_result_free(&mut result);
        html_converter_free(handle);
    }
});
