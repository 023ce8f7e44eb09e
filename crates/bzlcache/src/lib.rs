//! bzlcache command-line interface
//!
//! The binary is a thin layer over [`bzlcache_remote`] and [`bzlcache_log`]:
//! it parses arguments, sets up tracing and renders what the libraries
//! return.

pub mod cli;
pub mod commands;
pub mod errors;
pub mod render;
pub mod tracing;
