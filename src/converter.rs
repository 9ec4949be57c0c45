//! Markdown converter - transforms Markdown text into an HTML fragment
//!
//! This module owns the conversion pipeline: a fixed sequence of stages
//! applied to one working buffer. Each stage is a pure rule from
//! [`crate::rules`], [`crate::line_breaks`], [`crate::emoji`] or
//! [`crate::paragraph`]; the pipeline decides only the order and which
//! stages the options enable.
//!
//! # Stage Order
//!
//! 1. **Headers**: `#`, `##`, `###` lines
//! 2. **Code**: fenced blocks, then inline spans (parked as opaque tokens)
//! 3. **Emphasis**: `***x***`, `**x**`, `*x*`
//! 4. **Images and links**: images first so `![..](..)` is never a link
//! 5. **Lists**: `*`/`-`/`+` and `N.` items grouped into one line each
//! 6. **Tables**: pipe rows grouped into one line each
//! 7. **Line breaks**: `<br>` or `<p>` depending on [`LineBreakMode`]
//! 8. **Blockquotes, rules and strikethrough**
//! 9. **Emoji**: `:name:` shortcodes
//! 10. **Cleanup**: code restored, blocks lifted out of `<p>`, result trimmed
//!
//! The order matters. Code is parked before emphasis runs, so asterisks in
//! code stay literal. Lists and tables collapse to single lines before the
//! line-break stage, so they are recognized as blocks rather than prose.
//!
//! # Malformed Input
//!
//! Conversion never fails. Syntax that does not match a rule stays in the
//! output as literal text, and every rule matches in linear time.
//!
//! # Examples
//!
//! ```rust
//! use markdown_html_converter::converter::MarkdownConverter;
//!
//! let converter = MarkdownConverter::new();
//! let html = converter.convert("# Title\n\nHello **world**");
//! assert_eq!(html, "<h1>Title</h1>\n<p>Hello <strong>world</strong></p>");
//! ```
//!
//! [`LineBreakMode`]: crate::options::LineBreakMode

use std::fmt;
use std::time::SystemTime;

use tracing::{debug, trace};

use crate::emoji;
use crate::error::ConversionError;
use crate::history::ConversionResult;
use crate::line_breaks;
use crate::options::ConversionOptions;
use crate::paragraph;
use crate::rules::protect::is_sentinel;
use crate::rules::{ProtectedCode, block, inline};
use crate::stats::stats;

/// One named step of the conversion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Headers,
    Code,
    Emphasis,
    ImagesAndLinks,
    Lists,
    Tables,
    LineBreaks,
    BlockquotesRulesStrikethrough,
    Emoji,
    Cleanup,
}

impl Stage {
    /// Every stage, in execution order
    pub const ALL: [Stage; 10] = [
        Stage::Headers,
        Stage::Code,
        Stage::Emphasis,
        Stage::ImagesAndLinks,
        Stage::Lists,
        Stage::Tables,
        Stage::LineBreaks,
        Stage::BlockquotesRulesStrikethrough,
        Stage::Emoji,
        Stage::Cleanup,
    ];

    /// Stable name used in log events
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Headers => "headers",
            Stage::Code => "code",
            Stage::Emphasis => "emphasis",
            Stage::ImagesAndLinks => "images_and_links",
            Stage::Lists => "lists",
            Stage::Tables => "tables",
            Stage::LineBreaks => "line_breaks",
            Stage::BlockquotesRulesStrikethrough => "blockquotes_rules_strikethrough",
            Stage::Emoji => "emoji",
            Stage::Cleanup => "cleanup",
        }
    }

    /// Whether `options` turn this stage on
    pub fn is_enabled(&self, options: &ConversionOptions) -> bool {
        match self {
            Stage::Code => options.enable_code_blocks,
            Stage::Tables => options.enable_tables,
            Stage::Emoji => options.enable_emoji,
            _ => true,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Markdown to HTML converter
///
/// Holds only its options, so one converter can be shared freely between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: ConversionOptions,
}

impl MarkdownConverter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options
    ///
    /// # Examples
    ///
    /// ```rust
    /// use markdown_html_converter::converter::MarkdownConverter;
    /// use markdown_html_converter::options::{ConversionOptions, LineBreakMode};
    ///
    /// let options = ConversionOptions {
    ///     line_breaks: LineBreakMode::Github,
    ///     enable_emoji: true,
    ///     ..Default::default()
    /// };
    /// let converter = MarkdownConverter::with_options(options);
    /// assert_eq!(converter.convert("a\nb :tada:"), "a<br>\nb 🎉");
    /// ```
    pub fn with_options(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert a Markdown document to an HTML fragment
    ///
    /// Empty and whitespace-only documents produce `""`.
    pub fn convert(&self, markdown: &str) -> String {
        let mut buffer = prepare(markdown);
        if buffer.trim().is_empty() {
            return String::new();
        }

        let mut store = ProtectedCode::default();
        for stage in Stage::ALL {
            if !stage.is_enabled(&self.options) {
                trace!(stage = stage.name(), "stage disabled");
                continue;
            }
            buffer = self.run_stage(stage, &buffer, &mut store);
            trace!(stage = stage.name(), bytes = buffer.len(), "stage complete");
        }

        if self.options.sanitize_html {
            debug!("sanitizeHTML requested but no sanitization policy is configured; passing output through");
        }

        debug!(
            input_bytes = markdown.len(),
            output_bytes = buffer.len(),
            code_fragments = store.len(),
            "converted markdown document"
        );
        buffer
    }

    /// Convert a document and package it with its statistics
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::EmptyInput` for empty or whitespace-only
    /// documents, which are never recorded.
    pub fn convert_document(&self, markdown: &str) -> Result<ConversionResult, ConversionError> {
        if markdown.trim().is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let html = self.convert(markdown);
        let stats = stats(markdown);
        Ok(ConversionResult::new(
            markdown.to_string(),
            html,
            stats,
            SystemTime::now(),
        ))
    }

    fn run_stage(&self, stage: Stage, text: &str, store: &mut ProtectedCode) -> String {
        match stage {
            Stage::Headers => block::headers(text, self.options.enable_code_blocks).into_owned(),
            Stage::Code => {
                let fenced = block::fenced_code(text, store).into_owned();
                inline::inline_code(&fenced, store).into_owned()
            }
            Stage::Emphasis => inline::emphasis(text).into_owned(),
            Stage::ImagesAndLinks => {
                let images = inline::images(text);
                inline::links(&images).into_owned()
            }
            Stage::Lists => block::lists(text),
            Stage::Tables => block::tables(text),
            Stage::LineBreaks => line_breaks::normalize(text, self.options.line_breaks),
            Stage::BlockquotesRulesStrikethrough => {
                let quoted = block::blockquotes(text);
                let ruled = block::horizontal_rules(&quoted);
                inline::strikethrough(&ruled).into_owned()
            }
            Stage::Emoji => emoji::substitute(text).into_owned(),
            Stage::Cleanup => paragraph::cleanup(text, store),
        }
    }
}

/// Convert `markdown` with the given options
///
/// # Examples
///
/// ```rust
/// use markdown_html_converter::converter::convert;
/// use markdown_html_converter::options::ConversionOptions;
///
/// let html = convert("* one\n* two", &ConversionOptions::default());
/// assert_eq!(html, "<ul><li>one</li><li>two</li></ul>");
/// ```
pub fn convert(markdown: &str, options: &ConversionOptions) -> String {
    MarkdownConverter::with_options(*options).convert(markdown)
}

/// Normalize line endings and drop code points reserved for code tokens
fn prepare(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut chars = markdown.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            ch if is_sentinel(ch) => {}
            ch => out.push(ch),
        }
    }
    out
}
