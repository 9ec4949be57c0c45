#![no_main]

use libfuzzer_sys::fuzz_target;
use markdown_html_converter::{ConversionOptions, LineBreakMode, MarkdownConverter};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Ok(markdown) = std::str::from_utf8(rest) else {
        return;
    };

    let options = ConversionOptions {
        line_breaks: if flags & 1 == 0 {
            LineBreakMode::Standard
        } else {
            LineBreakMode::Github
        },
        enable_tables: flags & 2 != 0,
        enable_code_blocks: flags & 4 != 0,
        enable_emoji: flags & 8 != 0,
        sanitize_html: flags & 16 != 0,
    };

    let html = MarkdownConverter::with_options(options).convert(markdown);
    assert_eq!(html.trim(), html);
    assert!(!html.contains(['\u{E000}', '\u{E001}', '\u{E002}']));
});
