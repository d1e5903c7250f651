//! Error taxonomy shared by the codec and the transforms.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, saving, or transforming a bitmap.
#[derive(Debug, Error)]
pub enum BmpError {
    /// The file could not be opened for reading or created for writing.
    #[error("Cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while streaming an already-open file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file ended before the declared region was fully read.
    #[error("Truncated bitmap: expected {expected} bytes of {section}, got {actual}")]
    Truncated {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A dimension, bit depth, offset, sigma, or buffer length is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl BmpError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BmpError::InvalidArgument(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BmpError>;
