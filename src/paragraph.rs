//! Paragraph wrapping and final cleanup
//!
//! By the time paragraphs are formed, headings, lists, tables and code
//! blocks each occupy exactly one line of the buffer. Blockquotes and rules
//! are still raw syntax at that point, so they are recognized by shape.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::rules::block::is_rule_line;
use crate::rules::protect::is_block_token;
use crate::rules::{ProtectedCode, pattern, replace_all};

const BLOCK_PREFIXES: &[&str] = &[
    "<h1>",
    "<h2>",
    "<h3>",
    "<h4>",
    "<h5>",
    "<h6>",
    "<ul>",
    "<ol>",
    "<ol ",
    "<table>",
    "<blockquote>",
    "<hr>",
    "<pre>",
];

/// True if the line is a block-level element and must not be wrapped in
/// `<p>` or followed by `<br>`
pub fn is_block_line(line: &str) -> bool {
    let trimmed = line.trim();
    BLOCK_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
        || is_block_token(trimmed)
        || line.starts_with("> ")
        || is_rule_line(line)
}

/// Wrap blank-line-separated runs of prose lines in `<p>`
///
/// Lines of one run are joined with a plain newline. Block lines end the
/// current run and are emitted on their own line, unwrapped.
pub fn wrap_paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            flush(&mut run, &mut out);
        } else if is_block_line(line) {
            flush(&mut run, &mut out);
            out.push(line.to_string());
        } else {
            run.push(line);
        }
    }
    flush(&mut run, &mut out);

    out.join("\n")
}

fn flush(run: &mut Vec<&str>, out: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    out.push(format!("<p>{}</p>", run.join("\n")));
    run.clear();
}

fn paragraph_regex() -> Option<&'static Regex> {
    static PARAGRAPH: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&PARAGRAPH, r"(?s)<p>(.*?)</p>")
}

fn block_element_regex() -> Option<&'static Regex> {
    static BLOCK: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(
        &BLOCK,
        r"(?s)<h[1-6]>.*?</h[1-6]>|<ul>.*?</ul>|<ol[^>]*>.*?</ol>|<table>.*?</table>|<blockquote>.*?</blockquote>|<hr>|<pre>.*?</pre>",
    )
}

/// Restore code, lift block elements out of paragraphs and drop empty ones
pub(crate) fn cleanup(text: &str, store: &ProtectedCode) -> String {
    let restored = store.restore(text);
    let lifted = replace_all(paragraph_regex(), &restored, |caps| {
        split_paragraph(&caps[1])
    });
    lifted.trim().to_string()
}

/// Re-emit one paragraph body with any block elements outside `<p>`
fn split_paragraph(body: &str) -> String {
    let mut pieces: Vec<Cow<'_, str>> = Vec::new();
    let mut last = 0;

    if let Some(regex) = block_element_regex() {
        for block in regex.find_iter(body) {
            push_prose(&mut pieces, &body[last..block.start()]);
            pieces.push(Cow::Borrowed(block.as_str()));
            last = block.end();
        }
    }
    push_prose(&mut pieces, &body[last..]);

    pieces.join("\n")
}

fn push_prose<'a>(pieces: &mut Vec<Cow<'a, str>>, prose: &'a str) {
    let prose = prose.trim();
    if !prose.is_empty() {
        pieces.push(Cow::Owned(format!("<p>{prose}</p>")));
    }
}
