//! Error types for the catalog crate.
//!
//! Only the store itself can fail: the file is missing, unreadable, or not a
//! JSON array, or a record has no usable identifier. Missing or malformed
//! metadata fields are not errors; the parser degrades them to empty values.

use thiserror::Error;

/// Errors that can occur while reading a catalog snapshot
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The catalog document as a whole is not usable
    ///
    /// Raised when the content is not valid JSON or is not an array of
    /// movie documents.
    #[error("Invalid catalog format in {origin}: {reason}")]
    InvalidFormat { origin: String, reason: String },

    /// A single movie document couldn't be parsed
    ///
    /// `record` is the zero-based position of the document in the array.
    #[error("Parse error at record {record} in {origin}: {reason}")]
    ParseError {
        origin: String,
        record: usize,
        reason: String,
    },

    /// The backing store refused or failed the read
    #[error("Catalog store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
