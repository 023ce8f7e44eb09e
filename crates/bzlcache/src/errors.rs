//! Command-level errors
//!
//! Failures of individual digests are rendered inline by the commands; the
//! variants here decide the exit status once every input was attempted.

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Not all {what} were retrieved ({failed} of {total} failed)")]
    #[diagnostic(code(bzlcache::cli::partial_failure))]
    PartialFailure {
        /// Kind of entries that were requested
        what: &'static str,
        failed: usize,
        total: usize,
    },

    #[error("Bazel remote cache address not given")]
    #[diagnostic(
        code(bzlcache::cli::missing_remote),
        help("Pass --remote <host>:<port> or set BAZEL_REMOTE_CACHE")
    )]
    MissingRemote,

    #[error("Invalid argument: {message}")]
    #[diagnostic(
        code(bzlcache::cli::invalid_argument),
        help("Run 'bzlcache --help' to see available options")
    )]
    InvalidArgument { message: String },

    #[error("Can't {operation} {target}")]
    #[diagnostic(
        code(bzlcache::cli::output),
        help("Check file permissions and ensure the directory exists")
    )]
    Output {
        operation: &'static str,
        /// Destination file path or standard stream name
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Interrupted")]
    #[diagnostic(code(bzlcache::cli::interrupted))]
    Interrupted,
}

impl CliError {
    #[must_use]
    pub const fn partial_failure(what: &'static str, failed: usize, total: usize) -> Self {
        Self::PartialFailure {
            what,
            failed,
            total,
        }
    }

    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Writing to stdout failed
    #[must_use]
    pub fn stdout(source: std::io::Error) -> Self {
        Self::Output {
            operation: "write to",
            target: "standard output".to_string(),
            source,
        }
    }

    /// Writing to stderr failed
    #[must_use]
    pub fn stderr(source: std::io::Error) -> Self {
        Self::Output {
            operation: "write to",
            target: "standard error".to_string(),
            source,
        }
    }

    /// Opening or writing an output file failed
    #[must_use]
    pub fn file(operation: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Output {
            operation,
            target: path.as_ref().display().to_string(),
            source,
        }
    }
}
