//! Error types for remote cache operations

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Message rendered for every [`RemoteError::NotFound`], whatever the service said.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Error type for remote cache operations
#[derive(Error, Debug, Diagnostic)]
pub enum RemoteError {
    /// Textual digest is not `<hash>/<size>`
    #[error("Malformed digest '{input}': {reason}")]
    #[diagnostic(
        code(bzlcache::remote::malformed_digest),
        help("Digests are written as <hash>/<size>, e.g. 7d865e95.../3")
    )]
    MalformedDigest {
        /// The text that failed to parse
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// The action result or blob is absent upstream
    #[error("{what} not found")]
    #[diagnostic(
        code(bzlcache::remote::not_found),
        help("The entry may have been evicted or never uploaded")
    )]
    NotFound {
        /// What was looked up
        what: String,
    },

    /// Any other non-success status reported by the service
    #[error("Remote cache error ({}): {message}", code_name(.code.to_owned()))]
    #[diagnostic(code(bzlcache::remote::status))]
    Remote {
        /// Raw gRPC status code reported for the call or for the batch item
        code: i32,
        /// Message attached to the status
        message: String,
    },

    /// Channel could not be established
    #[error("Can't connect to the remote cache at {endpoint}: {message}")]
    #[diagnostic(
        code(bzlcache::remote::connection),
        help("Check the --remote address and that the cache is reachable")
    )]
    Connection {
        /// Endpoint as configured
        endpoint: String,
        /// Transport error description
        message: String,
    },

    /// The response shape violates the request/response contract
    #[error("Protocol error: {message}")]
    #[diagnostic(code(bzlcache::remote::protocol))]
    Protocol {
        /// Description of the violated invariant
        message: String,
    },

    /// Invalid client configuration
    #[error("Remote configuration error: {message}")]
    #[diagnostic(code(bzlcache::remote::config))]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },
}

impl RemoteError {
    /// Create a malformed digest error
    #[must_use]
    pub fn malformed_digest(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDigest {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a not found error
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a remote status error
    #[must_use]
    pub fn remote(code: i32, message: impl Into<String>) -> Self {
        Self::Remote {
            code,
            message: message.into(),
        }
    }

    /// Create a connection error
    #[must_use]
    pub fn connection_failed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a protocol error
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Classify a gRPC status code and message.
    ///
    /// `NOT_FOUND` becomes [`RemoteError::NotFound`] for `what`; any other
    /// non-OK code becomes [`RemoteError::Remote`], keeping the raw value
    /// even when it is outside the known range.
    #[must_use]
    pub fn from_status_code(code: i32, message: impl Into<String>, what: &str) -> Self {
        if code == i32::from(tonic::Code::NotFound) {
            Self::not_found(what)
        } else {
            Self::remote(code, message)
        }
    }

    /// Classify a status returned for a whole call.
    #[must_use]
    pub fn from_status(status: &tonic::Status, what: &str) -> Self {
        Self::from_status_code(i32::from(status.code()), status.message(), what)
    }

    /// Short, stable message for this error.
    ///
    /// [`RemoteError::NotFound`] always renders as [`NOT_FOUND_MESSAGE`],
    /// [`RemoteError::Remote`] passes the service message through, or names
    /// the status code when the service sent no message.
    #[must_use]
    pub fn classify(&self) -> String {
        match self {
            Self::NotFound { .. } => NOT_FOUND_MESSAGE.to_string(),
            Self::Remote { code, message } if message.is_empty() => code_name(*code),
            Self::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error is a [`RemoteError::NotFound`]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Name of a gRPC status code as gRPC spells it, `Code(<n>)` when unknown
#[must_use]
pub fn code_name(code: i32) -> String {
    let known = i32::from(tonic::Code::Ok)..=i32::from(tonic::Code::Unauthenticated);
    if !known.contains(&code) {
        return format!("Code({code})");
    }
    match tonic::Code::from_i32(code) {
        tonic::Code::Ok => "OK".to_string(),
        tonic::Code::Cancelled => "Canceled".to_string(),
        other => format!("{other:?}"),
    }
}

/// Map an error to its short human message. See [`RemoteError::classify`].
#[must_use]
pub fn classify_error(err: &RemoteError) -> String {
    err.classify()
}

/// Result type for remote cache operations
pub type Result<T> = std::result::Result<T, RemoteError>;
