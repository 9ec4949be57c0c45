//! Line-break normalization

use crate::options::LineBreakMode;
use crate::paragraph::{is_block_line, wrap_paragraphs};

/// Apply the paragraph / line-break policy of `mode`
///
/// - [`LineBreakMode::Github`]: a newline ending a prose or blank line
///   becomes `<br>` followed by the newline. Block lines keep a plain
///   newline.
/// - [`LineBreakMode::Standard`]: prose runs are wrapped in `<p>`.
pub fn normalize(text: &str, mode: LineBreakMode) -> String {
    match mode {
        LineBreakMode::Github => hard_breaks(text),
        LineBreakMode::Standard => wrap_paragraphs(text),
    }
}

fn hard_breaks(text: &str) -> String {
    let text = text.trim_end_matches('\n');
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut lines = text.split('\n').peekable();

    while let Some(line) = lines.next() {
        out.push_str(line);
        if lines.peek().is_none() {
            break;
        }
        if !is_block_line(line) {
            out.push_str("<br>");
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_breaks_between_prose_lines() {
        assert_eq!(normalize("a\nb", LineBreakMode::Github), "a<br>\nb");
    }

    #[test]
    fn test_github_breaks_blank_lines_but_not_block_lines() {
        assert_eq!(normalize("a\n\nb", LineBreakMode::Github), "a<br>\n<br>\nb");
        assert_eq!(
            normalize("<h1>T</h1>\na\n\nb", LineBreakMode::Github),
            "<h1>T</h1>\na<br>\n<br>\nb"
        );
        assert_eq!(
            normalize("> q\n---\nc", LineBreakMode::Github),
            "> q\n---\nc"
        );
    }

    #[test]
    fn test_github_ignores_trailing_newlines() {
        assert_eq!(normalize("a\nb\n\n", LineBreakMode::Github), "a<br>\nb");
    }

    #[test]
    fn test_github_single_line() {
        assert_eq!(normalize("only", LineBreakMode::Github), "only");
        assert_eq!(normalize("", LineBreakMode::Github), "");
    }

    #[test]
    fn test_standard_wraps_paragraphs() {
        assert_eq!(normalize("a\nb", LineBreakMode::Standard), "<p>a\nb</p>");
        assert_eq!(
            normalize("a\n\nb", LineBreakMode::Standard),
            "<p>a</p>\n<p>b</p>"
        );
    }
}
