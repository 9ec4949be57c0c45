//! Conversion options
//!
//! Options are plain data: a conversion reads them but never mutates them,
//! and nothing global is consulted. The serialized form uses the camelCase
//! field names of the configuration object that callers hand to the engine:
//!
//! ```json
//! {
//!   "lineBreaks": "standard",
//!   "enableTables": true,
//!   "enableCodeBlocks": true,
//!   "enableEmoji": false,
//!   "sanitizeHTML": true
//! }
//! ```
//!
//! Every field is required when loading from JSON. A missing field is a
//! configuration error at the boundary, not something the pipeline papers
//! over with a default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Paragraph / line-break policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreakMode {
    /// Blank lines separate paragraphs; single newlines stay inside a paragraph
    #[default]
    Standard,
    /// Every newline ending a prose line becomes a `<br>`
    Github,
}

impl LineBreakMode {
    /// Name used in configuration objects and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            LineBreakMode::Standard => "standard",
            LineBreakMode::Github => "github",
        }
    }
}

impl fmt::Display for LineBreakMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineBreakMode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(LineBreakMode::Standard),
            "github" => Ok(LineBreakMode::Github),
            other => Err(ConversionError::InvalidOptions(format!(
                "lineBreaks must be \"standard\" or \"github\", got {other:?}"
            ))),
        }
    }
}

/// Conversion options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConversionOptions {
    /// Paragraph / line-break policy
    pub line_breaks: LineBreakMode,
    /// Recognize pipe tables
    pub enable_tables: bool,
    /// Recognize fenced code blocks and inline code spans
    pub enable_code_blocks: bool,
    /// Replace `:token:` emoji shortcodes
    pub enable_emoji: bool,
    /// Declared intent to strip unsafe markup. No sanitization policy is
    /// implemented; the output passes through unchanged.
    #[serde(rename = "sanitizeHTML")]
    pub sanitize_html: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            line_breaks: LineBreakMode::Standard,
            enable_tables: true,
            enable_code_blocks: true,
            enable_emoji: false,
            sanitize_html: true,
        }
    }
}

impl ConversionOptions {
    /// Parse a fully specified options object
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::InvalidOptions` if a field is missing, has
    /// the wrong type or an unknown value, or if an unknown field is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use markdown_html_converter::options::{ConversionOptions, LineBreakMode};
    ///
    /// let options = ConversionOptions::from_json(r#"{
    ///     "lineBreaks": "github",
    ///     "enableTables": false,
    ///     "enableCodeBlocks": true,
    ///     "enableEmoji": true,
    ///     "sanitizeHTML": false
    /// }"#).unwrap();
    /// assert_eq!(options.line_breaks, LineBreakMode::Github);
    ///
    /// assert!(ConversionOptions::from_json(r#"{"lineBreaks": "github"}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::InvalidOptions(e.to_string()))
    }

    /// Serialize to the camelCase configuration object
    pub fn to_json(&self) -> String {
        // Plain enum + bools: serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}
