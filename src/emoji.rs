//! Emoji shortcode substitution

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::rules::pattern;

/// Shortcode to glyph table, sorted by shortcode
const EMOJI: &[(&str, &str)] = &[
    ("100", "💯"),
    ("eyes", "👀"),
    ("fire", "🔥"),
    ("heart", "❤️"),
    ("laughing", "😆"),
    ("rocket", "🚀"),
    ("smile", "😊"),
    ("star", "⭐"),
    ("tada", "🎉"),
    ("thumbsdown", "👎"),
    ("thumbsup", "👍"),
    ("wink", "😉"),
];

/// Look up the glyph for a shortcode name (without colons)
pub fn lookup(name: &str) -> Option<&'static str> {
    EMOJI
        .binary_search_by(|(code, _)| (*code).cmp(name))
        .ok()
        .map(|index| EMOJI[index].1)
}

/// Replace `:name:` shortcodes with their glyphs; unknown names stay literal
///
/// A colon closing an unknown name may open the next shortcode, so after a
/// miss the scan resumes at that colon.
pub fn substitute(text: &str) -> Cow<'_, str> {
    static SHORTCODE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(regex) = pattern(&SHORTCODE, r":([a-z0-9_+\-]+):") else {
        return Cow::Borrowed(text);
    };

    let mut out = String::new();
    let mut copied = 0;
    let mut pos = 0;
    while let Some(caps) = regex.captures_at(text, pos) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        match lookup(name.as_str()) {
            Some(glyph) => {
                out.push_str(&text[copied..whole.start()]);
                out.push_str(glyph);
                copied = whole.end();
                pos = whole.end();
            }
            None => pos = whole.end() - 1,
        }
    }

    if copied == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}
