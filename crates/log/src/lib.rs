//! Reader for Bazel's remote gRPC log
//!
//! Bazel can record every remote cache call it makes with
//! `--experimental_remote_grpc_log=<file>`. This crate decodes that file into
//! a stream of [`LogEvent`]s, one per recorded call, each carrying at most one
//! [`EventDetails`] variant for the RPC it describes.
//!
//! # Usage
//!
//! ```rust,ignore
//! for event in bzlcache_log::open("grpc.log")? {
//!     let event = event?;
//!     println!("{} {:?}", event.method_name, event.kind());
//! }
//! ```

pub mod error;
pub mod event;
pub mod proto;
pub mod reader;

pub use error::{LogError, Result};
pub use event::{EventDetails, LogEvent};
pub use reader::{FramedLogReader, open};
