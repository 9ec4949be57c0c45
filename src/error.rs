//! Error types for conversion operations
//!
//! The pipeline itself never fails: malformed Markdown degrades to literal
//! text. Errors only arise at the boundaries around it (option validation,
//! the C ABI, the result assembler and file export).

use thiserror::Error;

/// Errors that can occur around a Markdown to HTML conversion
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Character encoding error (input bytes are not UTF-8)
    #[error("Encoding error: {0}")]
    EncodingError(String),
    /// Invalid input data (NULL pointers, invalid parameters)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Missing or invalid option value
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    /// Nothing to convert (empty or whitespace-only document)
    #[error("Input required: the document is empty")]
    EmptyInput,
    /// Export could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ConversionError {
    /// Get numeric error code for FFI
    pub fn code(&self) -> u32 {
        match self {
            ConversionError::EncodingError(_) => 2,
            ConversionError::InvalidInput(_) => 5,
            ConversionError::InvalidOptions(_) => 6,
            ConversionError::EmptyInput => 7,
            ConversionError::Io(_) => 8,
            ConversionError::InternalError(_) => 99,
        }
    }
}
