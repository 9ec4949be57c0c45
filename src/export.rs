//! Downloadable HTML artifact

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConversionError;
use crate::etag::ETagGenerator;
use crate::history::ConversionResult;

/// File name of an exported document
pub const EXPORT_FILE_NAME: &str = "converted.html";
/// Media type of an exported document
pub const EXPORT_MIME_TYPE: &str = "text/html";

/// Converted HTML ready to be written out
///
/// The artifact is the HTML fragment exactly as converted, without any
/// surrounding document chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlExport {
    html: String,
}

impl HtmlExport {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_result(result: &ConversionResult) -> Self {
        Self::new(result.html_output())
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn file_name(&self) -> &'static str {
        EXPORT_FILE_NAME
    }

    pub fn mime_type(&self) -> &'static str {
        EXPORT_MIME_TYPE
    }

    /// Strong content ETag of the HTML bytes
    pub fn etag(&self) -> String {
        ETagGenerator::new().generate(self.html.as_bytes())
    }

    /// Write the HTML bytes to `writer`
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::Io` if the writer fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), ConversionError> {
        writer.write_all(self.html.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write `converted.html` into `dir` and return its path
    ///
    /// An existing file of that name is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::Io` if the file cannot be written.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ConversionError> {
        let path = dir.as_ref().join(EXPORT_FILE_NAME);
        fs::write(&path, self.html.as_bytes())?;
        debug!(path = %path.display(), bytes = self.html.len(), "exported html");
        Ok(path)
    }
}
