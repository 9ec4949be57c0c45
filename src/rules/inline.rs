//! Rules that match within a single line: code spans, emphasis, images,
//! links and strikethrough.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use super::protect::ProtectedCode;
use super::{escape_attr, escape_text, pattern, replace_all};

/// `` `code` `` becomes `<code>` and is parked in `store`
///
/// A span never crosses a newline and must hold at least one character.
pub(crate) fn inline_code<'t>(text: &'t str, store: &mut ProtectedCode) -> Cow<'t, str> {
    static CODE: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = pattern(&CODE, r"`([^`\n]+)`");
    replace_all(regex, text, |caps| {
        store.inline(format!("<code>{}</code>", escape_text(&caps[1])))
    })
}

/// `***x***`, `**x**` and `*x*` become strong/em markup
///
/// Longer markers are handled first so `***x***` nests as
/// `<strong><em>x</em></strong>`. Content may not start or end with
/// whitespace or `*`, which keeps list bullets and stray asterisks literal.
pub fn emphasis(text: &str) -> Cow<'_, str> {
    static TRIPLE: OnceLock<Option<Regex>> = OnceLock::new();
    static BOLD: OnceLock<Option<Regex>> = OnceLock::new();
    static ITALIC: OnceLock<Option<Regex>> = OnceLock::new();

    let triple = pattern(&TRIPLE, r"\*\*\*([^*\s](?:[^\n]*?[^*\s])?)\*\*\*");
    let bold = pattern(&BOLD, r"\*\*([^*\s](?:[^\n]*?[^*\s])?)\*\*");
    let italic = pattern(&ITALIC, r"\*([^*\s](?:[^*\n]*?[^*\s])?)\*");

    let text = replace_all(triple, text, |caps| {
        format!("<strong><em>{}</em></strong>", &caps[1])
    });
    let text = chain(text, |t| {
        replace_all(bold, t, |caps| format!("<strong>{}</strong>", &caps[1]))
    });
    chain(text, |t| {
        replace_all(italic, t, |caps| format!("<em>{}</em>", &caps[1]))
    })
}

/// Apply a rule to a buffer that may already be owned
fn chain<'t, F>(text: Cow<'t, str>, rule: F) -> Cow<'t, str>
where
    F: for<'a> FnOnce(&'a str) -> Cow<'a, str>,
{
    match text {
        Cow::Borrowed(borrowed) => rule(borrowed),
        Cow::Owned(owned) => Cow::Owned(rule(&owned).into_owned()),
    }
}

/// Split a link target into URL and optional quoted title
///
/// `url "title"` yields `("url", Some("title"))`.
fn split_target(target: &str) -> (&str, Option<&str>) {
    let target = target.trim();
    if let Some(without_close) = target.strip_suffix('"')
        && let Some((url, title)) = without_close.split_once(" \"")
    {
        return (url.trim_end(), Some(title));
    }
    (target, None)
}

fn title_attr(title: Option<&str>) -> String {
    match title {
        Some(title) => format!(" title=\"{}\"", escape_attr(title)),
        None => String::new(),
    }
}

/// `![alt](src)` becomes `<img>`
///
/// Runs before [`links`] so the bracketed part of an image is never read
/// as link text.
pub fn images(text: &str) -> Cow<'_, str> {
    static IMAGE: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = pattern(&IMAGE, r"!\[([^\]]*)\]\(([^)]+)\)");
    replace_all(regex, text, |caps| {
        let (src, title) = split_target(&caps[2]);
        format!(
            "<img src=\"{}\" alt=\"{}\"{}>",
            escape_attr(src),
            escape_attr(&caps[1]),
            title_attr(title)
        )
    })
}

/// `[text](href)` becomes `<a>`
pub fn links(text: &str) -> Cow<'_, str> {
    static LINK: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = pattern(&LINK, r"\[([^\]]+)\]\(([^)]+)\)");
    replace_all(regex, text, |caps| {
        let (href, title) = split_target(&caps[2]);
        format!(
            "<a href=\"{}\"{}>{}</a>",
            escape_attr(href),
            title_attr(title),
            &caps[1]
        )
    })
}

/// `~~x~~` becomes `<del>`
pub fn strikethrough(text: &str) -> Cow<'_, str> {
    static STRIKE: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = pattern(&STRIKE, r"~~([^\n]+?)~~");
    replace_all(regex, text, |caps| format!("<del>{}</del>", &caps[1]))
}
