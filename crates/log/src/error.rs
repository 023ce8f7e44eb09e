//! Error types for log decoding

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for reading a framed gRPC log
#[derive(Error, Debug, Diagnostic)]
pub enum LogError {
    /// The stream ended inside a length prefix or a frame body
    #[error("Frame {index} is truncated: expected {expected} bytes, got {available}")]
    #[diagnostic(
        code(bzlcache::log::truncated),
        help("The log may still be written by a running build, or was cut short")
    )]
    TruncatedFrame {
        /// Zero-based frame position in the stream
        index: usize,
        /// Bytes the frame announced
        expected: u64,
        /// Bytes actually present
        available: u64,
    },

    /// The frame body is not a valid log entry
    #[error("Frame {index} can't be decoded")]
    #[diagnostic(
        code(bzlcache::log::corrupt),
        help("Is this a log written by --experimental_remote_grpc_log?")
    )]
    CorruptFrame {
        /// Zero-based frame position in the stream
        index: usize,
        /// Protobuf decode failure
        #[source]
        source: prost::DecodeError,
    },

    /// The varint length prefix does not fit in 64 bits
    #[error("Frame {index} has an invalid length prefix")]
    #[diagnostic(code(bzlcache::log::length_prefix))]
    InvalidLengthPrefix {
        /// Zero-based frame position in the stream
        index: usize,
    },

    /// Reading the underlying stream failed
    #[error("I/O error{}", .path.as_ref().map(|p| format!(" on {}", p.display())).unwrap_or_default())]
    #[diagnostic(code(bzlcache::log::io))]
    Io {
        #[source]
        source: std::io::Error,
        /// File being read, when known
        path: Option<PathBuf>,
    },
}

impl LogError {
    /// Create a truncated frame error
    #[must_use]
    pub const fn truncated(index: usize, expected: u64, available: u64) -> Self {
        Self::TruncatedFrame {
            index,
            expected,
            available,
        }
    }

    /// Create a corrupt frame error
    #[must_use]
    pub const fn corrupt(index: usize, source: prost::DecodeError) -> Self {
        Self::CorruptFrame { index, source }
    }

    /// Create an invalid length prefix error
    #[must_use]
    pub const fn invalid_length_prefix(index: usize) -> Self {
        Self::InvalidLengthPrefix { index }
    }

    /// Create an I/O error not tied to a file
    #[must_use]
    pub const fn io(source: std::io::Error) -> Self {
        Self::Io { source, path: None }
    }

    /// Create an I/O error on a file
    #[must_use]
    pub fn io_at(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Attach a file path to an I/O error that has none
    #[must_use]
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            Self::Io { source, path: None } => Self::io_at(source, path),
            other => other,
        }
    }

    /// Position of the failing frame, when the error is about a frame
    #[must_use]
    pub const fn frame_index(&self) -> Option<usize> {
        match self {
            Self::TruncatedFrame { index, .. }
            | Self::CorruptFrame { index, .. }
            | Self::InvalidLengthPrefix { index } => Some(*index),
            Self::Io { .. } => None,
        }
    }
}

/// Result type for log operations
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_display() {
        let err = LogError::truncated(3, 120, 17);
        assert_eq!(
            err.to_string(),
            "Frame 3 is truncated: expected 120 bytes, got 17"
        );
        assert_eq!(err.frame_index(), Some(3));
    }

    #[test]
    fn test_io_display_with_and_without_path() {
        let err = LogError::io(std::io::Error::other("boom"));
        assert_eq!(err.to_string(), "I/O error");
        assert_eq!(err.frame_index(), None);

        let err = err.with_path("/tmp/grpc.log");
        assert_eq!(err.to_string(), "I/O error on /tmp/grpc.log");
    }

    #[test]
    fn test_with_path_keeps_frame_errors() {
        let err = LogError::invalid_length_prefix(0).with_path("x.log");
        assert!(matches!(err, LogError::InvalidLengthPrefix { index: 0 }));
    }

    #[test]
    fn test_diagnostic_code() {
        let err = LogError::truncated(0, 1, 0);
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("bzlcache::log::truncated"));
    }
}
