//! Error types for metadata extraction.
//!
//! Readers report [`ReadError`]; the extractor turns the fatal ones into
//! [`ExtractError::Unreadable`] for the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extraction calls.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Failure of a single reader attempt.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The reader does not understand this container, or found no metadata
    /// block in it. The extractor recovers by trying the next reader.
    #[error("{reader}: unsupported format ({reason})")]
    UnsupportedFormat { reader: &'static str, reason: String },

    /// The file could not be opened or read.
    #[error("{reader}: failed to read file")]
    Io {
        reader: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The container was recognized but its metadata could not be parsed.
    #[error("{reader}: malformed metadata ({reason})")]
    Malformed { reader: &'static str, reason: String },
}

impl ReadError {
    /// Whether the extractor may fall through to the next reader.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    /// Name of the reader that produced this error.
    pub fn reader(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { reader, .. }
            | Self::Io { reader, .. }
            | Self::Malformed { reader, .. } => reader,
        }
    }
}

/// Failure of a whole extraction call.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No reader could read the file.
    #[error("unreadable image metadata: {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    /// The extractor was built with an empty reader chain.
    #[error("no metadata readers configured")]
    NoReaders,
}
