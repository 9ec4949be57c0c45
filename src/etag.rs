//! Content ETags for exported HTML
//!
//! An exported document is identified by a BLAKE3 digest of its bytes:
//!
//! 1. Hash the HTML bytes with BLAKE3
//! 2. Keep the first 128 bits
//! 3. Hex-encode and wrap in double quotes (RFC 9110 entity tag)
//!
//! Identical HTML always yields the same tag, so a consumer can tell
//! whether a re-export actually changed anything.
//!
//! ```
//! use markdown_html_converter::etag::ETagGenerator;
//!
//! let generator = ETagGenerator::new();
//! let etag = generator.generate(b"<h1>Title</h1>");
//!
//! assert_eq!(etag.len(), 34); // 32 hex chars + 2 quotes
//! assert_eq!(etag, generator.generate(b"<h1>Title</h1>"));
//! ```

/// Length of a strong tag: 32 hex digits plus the quotes
pub const ETAG_LEN: usize = 34;

/// BLAKE3-based entity tag generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ETagGenerator;

impl ETagGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Strong ETag of `content`, formatted as `"<32 hex digits>"`
    pub fn generate(&self, content: &[u8]) -> String {
        let hash = blake3::hash(content);
        format!("\"{}\"", hex::encode(&hash.as_bytes()[..16]))
    }

    /// Weak ETag (`W/"..."`) of `content`
    pub fn generate_weak(&self, content: &[u8]) -> String {
        format!("W/{}", self.generate(content))
    }
}
