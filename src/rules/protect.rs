//! Placeholder store for rendered code
//!
//! Code blocks and spans are rendered as soon as they are recognized and
//! swapped for a token built from private-use code points. No rule pattern
//! can match inside a token, so emphasis, links, tables, line breaks and
//! emoji never touch code content. The cleanup stage puts the HTML back.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use super::{pattern, replace_all};

/// Opens a token standing for a fenced code block
pub(crate) const BLOCK_OPEN: char = '\u{E000}';
/// Opens a token standing for an inline code span
pub(crate) const INLINE_OPEN: char = '\u{E001}';
/// Closes either kind of token
pub(crate) const CLOSE: char = '\u{E002}';

/// True for the code points reserved for tokens
pub(crate) fn is_sentinel(ch: char) -> bool {
    matches!(ch, BLOCK_OPEN | INLINE_OPEN | CLOSE)
}

/// Rendered code fragments parked for the duration of one conversion
#[derive(Debug, Default)]
pub(crate) struct ProtectedCode {
    fragments: Vec<String>,
}

impl ProtectedCode {
    /// Park a rendered `<pre>` block and return its token
    pub(crate) fn block(&mut self, html: String) -> String {
        self.push(BLOCK_OPEN, html)
    }

    /// Park a rendered `<code>` span and return its token
    pub(crate) fn inline(&mut self, html: String) -> String {
        self.push(INLINE_OPEN, html)
    }

    fn push(&mut self, open: char, html: String) -> String {
        let index = self.fragments.len();
        self.fragments.push(html);
        format!("{open}{index}{CLOSE}")
    }

    pub(crate) fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Replace every token with the HTML it stands for
    pub(crate) fn restore<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.fragments.is_empty() {
            return Cow::Borrowed(text);
        }

        static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();
        let regex = pattern(&TOKEN, r"[\x{E000}\x{E001}](\d+)\x{E002}");

        replace_all(regex, text, |caps| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.fragments.get(index))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
    }
}

/// True if the line holds nothing but a code block token
pub(crate) fn is_block_token(line: &str) -> bool {
    let Some(rest) = line.trim().strip_prefix(BLOCK_OPEN) else {
        return false;
    };
    let Some(digits) = rest.strip_suffix(CLOSE) else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
