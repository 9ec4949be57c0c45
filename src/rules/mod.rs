//! Text substitution rules
//!
//! Rules are pure functions over the working buffer. Block rules
//! ([`block`]) are anchored at line start; inline rules ([`inline`]) match
//! anywhere within a line. Rendered code is parked in a [`ProtectedCode`]
//! store so later rules only ever see an opaque token in its place.
//!
//! Every pattern is compiled with the `regex` crate, which matches in time
//! linear to the input. Patterns are compiled once on first use; a pattern
//! that fails to compile disables its rule instead of panicking.

pub mod block;
pub mod inline;
pub(crate) mod protect;

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

pub(crate) use protect::ProtectedCode;

/// Fetch a cached pattern, compiling it on first use
pub(crate) fn pattern(
    cell: &'static OnceLock<Option<Regex>>,
    source: &str,
) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(source).ok()).as_ref()
}

/// `replace_all` that leaves the text untouched when the pattern is unavailable
pub(crate) fn replace_all<'t, F>(regex: Option<&Regex>, text: &'t str, replacer: F) -> Cow<'t, str>
where
    F: FnMut(&Captures<'_>) -> String,
{
    match regex {
        Some(regex) => regex.replace_all(text, replacer),
        None => Cow::Borrowed(text),
    }
}

/// Escape text for use inside an element (code content)
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape an attribute value written between double quotes
pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}
