//! Custom error types for the allods-assets crate.

use std::io;
use thiserror::Error;

/// The primary error type for all decoding operations in this crate.
///
/// Decoders never recover locally: any of these aborts the current asset and
/// no partially decoded structure is returned.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The byte source could not resolve a logical path.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The data is structurally invalid (bad magic, zero-sized frame,
    /// misaligned array length, runaway pixel run, ...).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The file name does not map to any known sprite encoding.
    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    /// The stream ended before a declared length or offset was satisfied.
    #[error("Truncated data: {0}")]
    Truncated(String),

    /// Any other I/O failure from the underlying stream.
    #[error("I/O error: {0:?}")]
    Io(#[source] io::Error),
}

impl AssetError {
    /// True for the structural errors of a file (bad magic, bad sizes, unknown variant).
    pub fn is_format_error(&self) -> bool {
        matches!(self, AssetError::InvalidFormat(_) | AssetError::UnsupportedFormat(_))
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, AssetError::Truncated(_))
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => AssetError::Truncated(err.to_string()),
            _ => AssetError::Io(err),
        }
    }
}

/// A convenience `Result` type alias using the crate's `AssetError` type.
pub type Result<T> = std::result::Result<T, AssetError>;
