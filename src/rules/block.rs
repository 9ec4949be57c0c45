//! Line-anchored rules: headers, fenced code, lists, tables, blockquotes
//! and horizontal rules.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::protect::ProtectedCode;
use super::{escape_text, pattern, replace_all};

fn fence_regex() -> Option<&'static Regex> {
    // Shortest match: a fence closes at the next triple backtick
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&FENCE, r"(?s)```(.*?)```")
}

/// Byte ranges of every complete fenced code region
fn fence_ranges(text: &str) -> Vec<Range<usize>> {
    match fence_regex() {
        Some(regex) => regex.find_iter(text).map(|m| m.range()).collect(),
        None => Vec::new(),
    }
}

/// `# `, `## ` and `### ` lines become `<h1>`–`<h3>`
///
/// `#{1,3}` followed by a space resolves to the longest marker, so `### x`
/// is never read as an `<h1>` of `## x`. Deeper markers stay literal. When
/// `skip_fences` is set, lines inside a fenced code region are left alone.
pub fn headers(text: &str, skip_fences: bool) -> Cow<'_, str> {
    static HEADER: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = pattern(&HEADER, r"(?m)^(#{1,3}) (.*)$");

    let fences = if skip_fences {
        fence_ranges(text)
    } else {
        Vec::new()
    };

    replace_all(regex, text, |caps| {
        let start = caps.get(0).map_or(0, |m| m.start());
        if fences.iter().any(|fence| fence.contains(&start)) {
            return caps[0].to_string();
        }
        let level = caps[1].len();
        format!("<h{level}>{}</h{level}>", caps[2].trim())
    })
}

/// Fenced code blocks become `<pre><code>` and are parked in `store`
///
/// When the opening fence line carries a single word, it is taken as the
/// language. An unterminated fence does not match and stays literal.
pub(crate) fn fenced_code<'t>(text: &'t str, store: &mut ProtectedCode) -> Cow<'t, str> {
    replace_all(fence_regex(), text, |caps| {
        let (language, body) = split_info_string(&caps[1]);
        let html = match language {
            Some(language) => format!(
                "<pre><code class=\"language-{language}\">{}</code></pre>",
                escape_text(body)
            ),
            None => format!("<pre><code>{}</code></pre>", escape_text(body)),
        };
        store.block(html)
    })
}

fn split_info_string(body: &str) -> (Option<&str>, &str) {
    if let Some((first, rest)) = body.split_once('\n') {
        let info = first.trim();
        if info.is_empty() {
            return (None, rest);
        }
        if info
            .chars()
            .all(|ch| ch.is_alphanumeric() || matches!(ch, '+' | '-' | '#' | '.' | '_'))
        {
            return (Some(info), rest);
        }
    }
    (None, body)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

struct ListItem<'a> {
    kind: ListKind,
    number: Option<u64>,
    text: &'a str,
}

/// `- - -` and `* * *` are spaced rule syntax, not one-item lists
fn is_spaced_marker_run(line: &str) -> bool {
    let Some(marker) = line.chars().next() else {
        return false;
    };
    line.chars().filter(|&ch| ch == marker).count() >= 3
        && line.chars().all(|ch| ch == marker || ch == ' ' || ch == '\t')
}

fn list_item(line: &str) -> Option<ListItem<'_>> {
    if is_spaced_marker_run(line) {
        return None;
    }
    for marker in ["* ", "- ", "+ "] {
        if let Some(text) = line.strip_prefix(marker) {
            return Some(ListItem {
                kind: ListKind::Unordered,
                number: None,
                text: text.trim_end(),
            });
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let text = line[digits..].strip_prefix(". ")?;
    Some(ListItem {
        kind: ListKind::Ordered,
        number: line[..digits].parse().ok(),
        text: text.trim_end(),
    })
}

/// List lines become `<li>` elements grouped into `<ul>` / `<ol>`
///
/// Adjacent items of the same kind share one container even when blank
/// lines separate them. Each container is emitted on a single line so the
/// line-break stage treats it as one block.
pub fn lists(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let Some(first) = list_item(lines[i]) else {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        };

        let kind = first.kind;
        let mut html = match (kind, first.number) {
            (ListKind::Unordered, _) => String::from("<ul>"),
            (ListKind::Ordered, Some(start)) if start != 1 => format!("<ol start=\"{start}\">"),
            (ListKind::Ordered, _) => String::from("<ol>"),
        };
        push_item(&mut html, first.text);
        i += 1;

        loop {
            let next = lines[i..]
                .iter()
                .position(|line| !line.trim().is_empty())
                .map(|offset| i + offset);
            match next.and_then(|j| list_item(lines[j]).map(|item| (j, item))) {
                Some((j, item)) if item.kind == kind => {
                    push_item(&mut html, item.text);
                    i = j + 1;
                }
                _ => break,
            }
        }

        html.push_str(match kind {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        });
        out.push(html);
    }

    out.join("\n")
}

fn push_item(html: &mut String, text: &str) {
    html.push_str("<li>");
    html.push_str(text);
    html.push_str("</li>");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_separator_cell(cell: &str) -> Self {
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) if cell.len() > 1 => Alignment::Center,
            (true, _) => Alignment::Left,
            (false, true) => Alignment::Right,
            (false, false) => Alignment::None,
        }
    }

    fn style(self) -> &'static str {
        match self {
            Alignment::None => "",
            Alignment::Left => " style=\"text-align: left\"",
            Alignment::Center => " style=\"text-align: center\"",
            Alignment::Right => " style=\"text-align: right\"",
        }
    }
}

/// Inner text of a `|...|` line, or `None` if the line is not a row
fn row_inner(line: &str) -> Option<&str> {
    let line = line.trim_end();
    if line.len() < 3 {
        return None;
    }
    line.strip_prefix('|')?.strip_suffix('|')
}

fn is_separator(inner: &str) -> bool {
    inner.contains('-')
        && inner
            .chars()
            .all(|ch| matches!(ch, '-' | '|' | ':' | ' ' | '\t'))
}

fn cells(inner: &str) -> impl Iterator<Item = &str> {
    inner.split('|').map(str::trim)
}

/// Pipe-table lines become one `<table>` per run of rows
///
/// The dash/pipe separator line is dropped. Rows above it use `<th>`, rows
/// below it `<td>`; without a separator every row is a header row. Like
/// lists, blank lines between rows do not split the table.
pub fn tables(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if row_inner(lines[i]).is_none() {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        }

        let mut rows: Vec<&str> = Vec::new();
        loop {
            let next = lines[i..]
                .iter()
                .position(|line| !line.trim().is_empty())
                .map(|offset| i + offset);
            match next.and_then(|j| row_inner(lines[j]).map(|inner| (j, inner))) {
                Some((j, inner)) => {
                    rows.push(inner);
                    i = j + 1;
                }
                None => break,
            }
        }

        if let Some(table) = render_table(&rows) {
            out.push(table);
        }
    }

    out.join("\n")
}

fn render_table(rows: &[&str]) -> Option<String> {
    let mut alignments: Vec<Alignment> = Vec::new();
    let mut in_body = false;
    let mut html = String::from("<table>");
    let mut row_count = 0;

    for inner in rows {
        if is_separator(inner) {
            if !in_body {
                alignments = cells(inner).map(Alignment::from_separator_cell).collect();
            }
            in_body = true;
            continue;
        }

        let tag = if in_body { "td" } else { "th" };
        html.push_str("<tr>");
        for (column, cell) in cells(inner).enumerate() {
            let style = alignments
                .get(column)
                .copied()
                .unwrap_or(Alignment::None)
                .style();
            html.push_str(&format!("<{tag}{style}>{cell}</{tag}>"));
        }
        html.push_str("</tr>");
        row_count += 1;
    }

    if row_count == 0 {
        return None;
    }
    html.push_str("</table>");
    Some(html)
}

/// `> text` lines become `<blockquote>` elements, one per line
pub fn blockquotes(text: &str) -> Cow<'_, str> {
    static QUOTE: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = pattern(&QUOTE, r"(?m)^> (.*)$");
    replace_all(regex, text, |caps| {
        format!("<blockquote>{}</blockquote>", &caps[1])
    })
}

fn rule_regex() -> Option<&'static Regex> {
    static RULE: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&RULE, r"(?m)^(?:-{3,}|\*{3,}|_{3,})[ \t]*$")
}

/// True for a line that the horizontal-rule rule will replace
pub fn is_rule_line(line: &str) -> bool {
    let line = line.trim_end();
    let Some(first) = line.chars().next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && line.len() >= 3 && line.chars().all(|ch| ch == first)
}

/// A line of three or more `-`, `*` or `_` becomes `<hr>`
pub fn horizontal_rules(text: &str) -> Cow<'_, str> {
    replace_all(rule_regex(), text, |_| String::from("<hr>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_levels() {
        assert_eq!(headers("# One", false), "<h1>One</h1>");
        assert_eq!(headers("## Two", false), "<h2>Two</h2>");
        assert_eq!(headers("### Three", false), "<h3>Three</h3>");
    }

    #[test]
    fn test_header_longest_prefix_wins() {
        let out = headers("### Deep\n## Mid\n# Top", false);
        assert_eq!(out, "<h3>Deep</h3>\n<h2>Mid</h2>\n<h1>Top</h1>");
    }

    #[test]
    fn test_header_requires_space_and_line_start() {
        assert_eq!(headers("#NoSpace", false), "#NoSpace");
        assert_eq!(headers("text # not", false), "text # not");
        assert_eq!(headers("#### Four", false), "#### Four");
    }

    #[test]
    fn test_header_inside_fence_is_skipped() {
        let text = "```\n# comment\n```\n# Title";
        assert_eq!(
            headers(text, true),
            "```\n# comment\n```\n<h1>Title</h1>"
        );
        // Without fence awareness the comment line is a header too
        assert!(headers(text, false).starts_with("```\n<h1>comment</h1>"));
    }

    #[test]
    fn test_fenced_code_with_language() {
        let mut store = ProtectedCode::default();
        let out = fenced_code("```rust\nfn main() {}\n```", &mut store);
        assert_eq!(
            store.restore(&out),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_escapes_markup() {
        let mut store = ProtectedCode::default();
        let out = fenced_code("```\n<div>&</div>\n```", &mut store);
        assert_eq!(
            store.restore(&out),
            "<pre><code>&lt;div&gt;&amp;&lt;/div&gt;\n</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_is_non_greedy() {
        let mut store = ProtectedCode::default();
        let out = fenced_code("```a``` middle ```b```", &mut store);
        assert_eq!(
            store.restore(&out),
            "<pre><code>a</code></pre> middle <pre><code>b</code></pre>"
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unterminated_fence_stays_literal() {
        let mut store = ProtectedCode::default();
        let out = fenced_code("```rust\nfn main() {}", &mut store);
        assert_eq!(out, "```rust\nfn main() {}");
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_multi_word_info_line_is_content() {
        assert_eq!(split_info_string("not a tag\nbody"), (None, "not a tag\nbody"));
        assert_eq!(split_info_string("\nbody"), (None, "body"));
        assert_eq!(split_info_string("c++\nbody"), (Some("c++"), "body"));
        assert_eq!(split_info_string("inline"), (None, "inline"));
    }

    #[test]
    fn test_unordered_list_grouping() {
        assert_eq!(
            lists("* one\n* two\n- three"),
            "<ul><li>one</li><li>two</li><li>three</li></ul>"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(lists("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
        assert_eq!(lists("3. c\n4. d"), "<ol start=\"3\"><li>c</li><li>d</li></ol>");
    }

    #[test]
    fn test_blank_lines_do_not_split_a_list() {
        assert_eq!(lists("* a\n\n* b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_list_kinds_do_not_merge() {
        assert_eq!(
            lists("* a\n1. b"),
            "<ul><li>a</li></ul>\n<ol><li>b</li></ol>"
        );
    }

    #[test]
    fn test_list_keeps_surrounding_lines() {
        assert_eq!(
            lists("intro\n* a\n\noutro"),
            "intro\n<ul><li>a</li></ul>\n\noutro"
        );
    }

    #[test]
    fn test_spaced_marker_runs_are_not_lists() {
        assert_eq!(lists("- - -"), "- - -");
        assert_eq!(lists("* * *"), "* * *");
        assert_eq!(lists("- - x"), "<ul><li>- x</li></ul>");
    }

    #[test]
    fn test_non_list_lines() {
        assert_eq!(lists("*emphasis*"), "*emphasis*");
        assert_eq!(lists("1.5 million"), "1.5 million");
        assert_eq!(lists("---"), "---");
    }

    #[test]
    fn test_table_with_separator() {
        assert_eq!(
            tables("| A | B |\n|---|---|\n| 1 | 2 |"),
            "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>"
        );
    }

    #[test]
    fn test_table_without_separator_uses_header_cells() {
        assert_eq!(
            tables("| A | B |"),
            "<table><tr><th>A</th><th>B</th></tr></table>"
        );
    }

    #[test]
    fn test_table_alignment() {
        let out = tables("| L | C | R |\n|:--|:-:|--:|\n| 1 | 2 | 3 |");
        assert!(out.contains("<th style=\"text-align: left\">L</th>"));
        assert!(out.contains("<td style=\"text-align: center\">2</td>"));
        assert!(out.contains("<td style=\"text-align: right\">3</td>"));
    }

    #[test]
    fn test_separator_only_block_is_removed() {
        assert_eq!(tables("before\n|---|\nafter"), "before\nafter");
    }

    #[test]
    fn test_table_surrounded_by_text() {
        assert_eq!(
            tables("text\n| a |\n\nmore"),
            "text\n<table><tr><th>a</th></tr></table>\n\nmore"
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(blockquotes("> quoted"), "<blockquote>quoted</blockquote>");
        assert_eq!(blockquotes("a > b"), "a > b");
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(horizontal_rules("a\n---\nb"), "a\n<hr>\nb");
        assert_eq!(horizontal_rules("***"), "<hr>");
        assert_eq!(horizontal_rules("-- not"), "-- not");
        assert!(is_rule_line("_____"));
        assert!(!is_rule_line("--"));
        assert!(!is_rule_line("-*-"));
    }
}
