//! Conversion results and the bounded history of recent conversions

use std::collections::VecDeque;
use std::time::SystemTime;

use crate::stats::DocumentStats;

/// Number of results kept by [`ConversionHistory::new`]
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// One completed conversion
///
/// Created once per successful conversion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    original_markdown: String,
    html_output: String,
    stats: DocumentStats,
    timestamp: SystemTime,
}

impl ConversionResult {
    pub(crate) fn new(
        original_markdown: String,
        html_output: String,
        stats: DocumentStats,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            original_markdown,
            html_output,
            stats,
            timestamp,
        }
    }

    pub fn original_markdown(&self) -> &str {
        &self.original_markdown
    }

    pub fn html_output(&self) -> &str {
        &self.html_output
    }

    pub fn word_count(&self) -> usize {
        self.stats.word_count
    }

    pub fn character_count(&self) -> usize {
        self.stats.character_count
    }

    pub fn stats(&self) -> DocumentStats {
        self.stats
    }

    /// When the conversion completed
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

/// Most-recent-first list of conversions, deduplicated by raw text
///
/// # Examples
///
/// ```rust
/// use markdown_html_converter::{ConversionHistory, MarkdownConverter};
///
/// let converter = MarkdownConverter::new();
/// let mut history = ConversionHistory::new();
///
/// history.record(converter.convert_document("first").unwrap());
/// history.record(converter.convert_document("second").unwrap());
/// history.record(converter.convert_document("first").unwrap());
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.latest().unwrap().original_markdown(), "first");
/// ```
#[derive(Debug, Clone)]
pub struct ConversionHistory {
    entries: VecDeque<ConversionResult>,
    capacity: usize,
}

impl Default for ConversionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// History keeping at most `capacity` results
    ///
    /// A capacity of zero keeps nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a result as the most recent entry
    ///
    /// An earlier entry with the same raw text is replaced, and the oldest
    /// entry is evicted once the history is full.
    pub fn record(&mut self, result: ConversionResult) {
        self.entries
            .retain(|entry| entry.original_markdown != result.original_markdown);
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&ConversionResult> {
        self.entries.front()
    }

    /// Entries from most to least recent
    pub fn iter(&self) -> impl Iterator<Item = &ConversionResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
