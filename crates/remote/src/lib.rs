//! Remote cache client for bzlcache
//!
//! This crate reads entries of a Bazel Remote Execution API v2 cache:
//! action results from the ActionCache and blobs from the
//! ContentAddressableStorage, both addressed by digests. Service statuses
//! are normalized into [`RemoteError`] so callers can tell a cache miss
//! from a transport or protocol failure.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bzlcache_remote::{Digest, RemoteCacheClient, RemoteConfig};
//!
//! let config = RemoteConfig::new("grpc://localhost:9092");
//! let client = RemoteCacheClient::connect(&config).await?;
//! let blob = client.get_blob(&"4a5e1e4b.../11".parse::<Digest>()?).await?;
//! ```

pub mod channel;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod model;
pub mod proto;
pub mod service;

/// REAPI v2 wire types
pub use proto::build::bazel::remote::execution::v2 as reapi;

pub use client::{Outcome, RemoteCacheClient, Report, action_hash};
pub use config::{AuthConfig, RemoteConfig};
pub use digest::Digest;
pub use error::{NOT_FOUND_MESSAGE, RemoteError, Result, classify_error, code_name};
pub use model::{ActionResult, OutputDirectory, OutputFile, OutputSymlink};
pub use service::{CacheService, GrpcCacheService};
