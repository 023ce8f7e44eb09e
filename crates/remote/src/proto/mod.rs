//! Protobuf wire types for the REAPI subset used by this workspace.
//!
//! The files under this directory are maintained by hand in the shape
//! prost/tonic code generation produces, for
//! `build/bazel/remote/execution/v2/remote_execution.proto` and its imports.
//! They cover only the messages and RPCs the client and the log decoder
//! touch. Field tags match upstream, so messages with extra fields still
//! decode (unknown fields are skipped).

#![allow(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]

/// Bazel API types
pub mod build {
    pub mod bazel {
        pub mod remote {
            pub mod execution {
                pub mod v2 {
                    include!("build.bazel.remote.execution.v2.rs");
                }
            }
        }
        pub mod semver {
            include!("build.bazel.semver.rs");
        }
    }
}

/// Google API types
pub mod google {
    pub mod bytestream {
        include!("google.bytestream.rs");
    }
    pub mod rpc {
        include!("google.rpc.rs");
    }
}
