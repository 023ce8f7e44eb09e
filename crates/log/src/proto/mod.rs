//! Protobuf wire types of Bazel's gRPC log (`remote_execution_log.proto`).
//!
//! Only the RPC kinds the decoder reports are declared; entries recording
//! other kinds (`Execute`, `WaitExecution`, `QueryWriteStatus`) decode with
//! empty details.

#![allow(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]

/// `remote_logging` package
pub mod remote_logging {
    include!("remote_logging.rs");
}
