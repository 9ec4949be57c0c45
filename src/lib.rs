//! Markdown to HTML Converter
//!
//! A rule-based conversion engine for a Markdown-like dialect. A document
//! goes through a fixed sequence of text rules and comes out as an HTML
//! fragment, together with word and character counts of the raw input.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `converter`: the staged conversion pipeline
//! - `rules`: block and inline substitution rules, plus code protection
//! - `line_breaks`: `<br>` vs `<p>` policy
//! - `paragraph`: paragraph wrapping and final cleanup
//! - `emoji`: `:name:` shortcode substitution
//! - `stats`: word and character counts
//! - `history`: conversion results and the bounded recent-history list
//! - `export`: the downloadable `converted.html` artifact
//! - `etag`: BLAKE3 content ETags
//! - `options`: typed, JSON-loadable conversion options
//! - `ffi`: C-compatible interface for embedding
//!
//! # Example
//!
//! ```
//! use markdown_html_converter::{convert, ConversionOptions};
//!
//! let html = convert("# Notes\n\n* one\n* two", &ConversionOptions::default());
//! assert_eq!(html, "<h1>Notes</h1>\n<ul><li>one</li><li>two</li></ul>");
//! ```
//!
//! # Safety
//!
//! All FFI functions that dereference pointers are `unsafe` and document
//! their contract. Memory allocated by Rust must be freed by Rust via the
//! provided cleanup functions.

pub mod converter;
pub mod emoji;
pub mod error;
pub mod etag;
pub mod export;
pub mod ffi;
pub mod history;
pub mod line_breaks;
pub mod options;
pub mod paragraph;
pub mod rules;
pub mod stats;

// Re-export main types for convenience
pub use converter::{MarkdownConverter, Stage, convert};
pub use error::ConversionError;
pub use export::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE, HtmlExport};
pub use ffi::{HtmlOptions, HtmlResult};
pub use history::{ConversionHistory, ConversionResult};
pub use options::{ConversionOptions, LineBreakMode};
pub use stats::{DocumentStats, stats};
