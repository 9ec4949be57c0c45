//! Document statistics computed from the raw Markdown

/// Word and character counts of a raw document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    /// Whitespace-delimited, non-empty tokens
    pub word_count: usize,
    /// Unicode scalar values, whitespace included
    pub character_count: usize,
}

/// Compute statistics for raw (pre-conversion) Markdown
///
/// Counts are taken from the input as typed, so Markdown punctuation such as
/// `**` is part of both the words it touches and the character count.
/// Independent of conversion options.
///
/// # Examples
///
/// ```
/// use markdown_html_converter::stats::stats;
///
/// let s = stats("Hello **world**");
/// assert_eq!(s.word_count, 2);
/// assert_eq!(s.character_count, 15);
/// ```
pub fn stats(markdown: &str) -> DocumentStats {
    DocumentStats {
        word_count: markdown.split_whitespace().count(),
        character_count: markdown.chars().count(),
    }
}
