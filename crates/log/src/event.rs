//! Normalized log events
//!
//! A [`LogEvent`] is one recorded remote cache call: the shared envelope
//! (timestamps, method, status, request metadata) plus at most one
//! [`EventDetails`] variant describing the call itself.

use crate::proto::remote_logging as wire;
use bzlcache_remote::proto::build::bazel::semver;
use bzlcache_remote::{ActionResult, Digest, reapi};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;

/// One decoded log entry
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LogEvent {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Full gRPC method, e.g. `build.bazel.remote.execution.v2.ActionCache/GetActionResult`
    pub method_name: String,
    pub status: CallStatus,
    pub metadata: CallMetadata,
    pub details: Option<EventDetails>,
}

/// Final status of the logged call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CallStatus {
    pub code: i32,
    pub message: String,
}

/// Request metadata attached by the build tool
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CallMetadata {
    pub tool_name: String,
    pub tool_version: String,
    pub invocation_id: String,
    pub action_id: Option<String>,
    pub correlated_invocations_id: Option<String>,
    pub action_mnemonic: Option<String>,
    pub target_id: Option<String>,
    pub configuration_id: Option<String>,
}

/// The RPC recorded by an event. Exactly one kind per event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDetails {
    GetCapabilities(GetCapabilities),
    GetActionResult(GetActionResult),
    Read(Read),
    FindMissingBlobs(FindMissingBlobs),
    Write(Write),
    UpdateActionResult(UpdateActionResult),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetCapabilities {
    pub request: GetCapabilitiesRequest,
    pub response: ServerCapabilities,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GetCapabilitiesRequest {
    pub instance_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ServerCapabilities {
    pub cache_capabilities: Option<CacheCapabilities>,
    pub execution_capabilities: Option<ExecutionCapabilities>,
    pub deprecated_api_version: Option<SemVer>,
    pub low_api_version: Option<SemVer>,
    pub high_api_version: Option<SemVer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CacheCapabilities {
    pub digest_functions: Vec<String>,
    pub update_enabled: bool,
    pub max_batch_total_size_bytes: i64,
    pub symlink_absolute_path_strategy: i32,
    pub supported_compressors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExecutionCapabilities {
    pub digest_function: String,
    pub exec_enabled: bool,
    pub digest_functions: Vec<String>,
}

/// API version advertised by a server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SemVer {
    pub major: i32,
    pub minor: i32,
    pub patch: i32,
    pub prerelease: String,
}

impl fmt::Display for SemVer {
    /// `major.minor[.patch]prerelease`, the patch being left out when zero
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}{}", self.major, self.minor, self.prerelease)
        } else {
            write!(f, "{}.{}.{}{}", self.major, self.minor, self.patch, self.prerelease)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetActionResult {
    pub request: GetActionResultRequest,
    /// Absent when the lookup missed
    pub response: Option<ActionResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GetActionResultRequest {
    pub instance_name: Option<String>,
    pub action_digest: Option<Digest>,
    pub inline_stdout: bool,
    pub inline_stderr: bool,
    pub inline_output_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateActionResult {
    pub request: UpdateActionResultRequest,
    pub response: Option<ActionResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UpdateActionResultRequest {
    pub instance_name: Option<String>,
    pub action_digest: Option<Digest>,
    pub action_result: Option<ActionResult>,
    pub results_cache_policy: Option<ResultsCachePolicy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultsCachePolicy {
    pub priority: i32,
}

/// A ByteStream read, summarized rather than itemized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Read {
    pub request: ReadRequest,
    pub response: ReadSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReadRequest {
    pub resource_name: String,
    pub read_offset: i64,
    pub read_limit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReadSummary {
    pub num_reads: i64,
    pub bytes_read: i64,
}

/// A ByteStream write, one entry per streamed chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Write {
    pub request: WriteRequest,
    pub response: WriteResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WriteRequest {
    pub resource_names: Vec<String>,
    pub offsets: Vec<i64>,
    pub finish_writes: Vec<bool>,
    pub num_writes: i64,
    pub bytes_sent: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WriteResponse {
    pub committed_size: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindMissingBlobs {
    pub request: FindMissingBlobsRequest,
    pub response: FindMissingBlobsResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FindMissingBlobsRequest {
    pub instance_name: Option<String>,
    pub blob_digests: Vec<Digest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FindMissingBlobsResponse {
    pub missing_blob_digests: Vec<Digest>,
}

impl LogEvent {
    /// Service and method parts of the method name.
    ///
    /// A method name without `/` is returned whole as the service.
    pub fn service_and_method(&self) -> (&str, &str) {
        self.method_name
            .split_once('/')
            .unwrap_or((self.method_name.as_str(), ""))
    }

    /// Wall time of the call, when both timestamps were recorded
    pub fn duration(&self) -> Option<TimeDelta> {
        Some(self.end_time? - self.start_time?)
    }

    /// Name of the recorded RPC kind, if any
    pub fn kind(&self) -> Option<&'static str> {
        self.details.as_ref().map(EventDetails::name)
    }
}

impl EventDetails {
    /// RPC name of this variant
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetCapabilities(_) => "GetCapabilities",
            Self::GetActionResult(_) => "GetActionResult",
            Self::Read(_) => "Read",
            Self::FindMissingBlobs(_) => "FindMissingBlobs",
            Self::Write(_) => "Write",
            Self::UpdateActionResult(_) => "UpdateActionResult",
        }
    }
}

/// Name of a `DigestFunction.Value`
pub fn digest_function_name(value: i32) -> String {
    match value {
        0 => "UNKNOWN".to_string(),
        1 => "SHA256".to_string(),
        2 => "SHA1".to_string(),
        3 => "MD5".to_string(),
        4 => "VSO".to_string(),
        5 => "SHA384".to_string(),
        6 => "SHA512".to_string(),
        7 => "MURMUR3".to_string(),
        8 => "SHA256TREE".to_string(),
        9 => "BLAKE3".to_string(),
        other => other.to_string(),
    }
}

/// Name of a `Compressor.Value`
pub fn compressor_name(value: i32) -> String {
    match value {
        0 => "IDENTITY".to_string(),
        1 => "ZSTD".to_string(),
        2 => "DEFLATE".to_string(),
        3 => "BROTLI".to_string(),
        other => other.to_string(),
    }
}

// Conversions from the wire representation

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn timestamp(ts: Option<prost_types::Timestamp>) -> Option<DateTime<Utc>> {
    let ts = ts?;
    let nanos = u32::try_from(ts.nanos).ok()?;
    DateTime::from_timestamp(ts.seconds, nanos)
}

fn digests(list: Vec<reapi::Digest>) -> Vec<Digest> {
    list.into_iter().map(Digest::from).collect()
}

impl From<wire::LogEntry> for LogEvent {
    fn from(entry: wire::LogEntry) -> Self {
        let status = entry.status.unwrap_or_default();
        Self {
            start_time: timestamp(entry.start_time),
            end_time: timestamp(entry.end_time),
            method_name: entry.method_name,
            status: CallStatus {
                code: status.code,
                message: status.message,
            },
            metadata: entry.metadata.map(CallMetadata::from).unwrap_or_default(),
            details: entry
                .details
                .and_then(|d| d.details)
                .map(EventDetails::from),
        }
    }
}

impl From<reapi::RequestMetadata> for CallMetadata {
    fn from(m: reapi::RequestMetadata) -> Self {
        let tool = m.tool_details.unwrap_or_default();
        Self {
            tool_name: tool.tool_name,
            tool_version: tool.tool_version,
            invocation_id: m.tool_invocation_id,
            action_id: non_empty(m.action_id),
            correlated_invocations_id: non_empty(m.correlated_invocations_id),
            action_mnemonic: non_empty(m.action_mnemonic),
            target_id: non_empty(m.target_id),
            configuration_id: non_empty(m.configuration_id),
        }
    }
}

impl From<wire::rpc_call_details::Details> for EventDetails {
    fn from(details: wire::rpc_call_details::Details) -> Self {
        use wire::rpc_call_details::Details as D;

        match details {
            D::GetCapabilities(d) => Self::GetCapabilities(GetCapabilities {
                request: GetCapabilitiesRequest {
                    instance_name: d.request.and_then(|r| non_empty(r.instance_name)),
                },
                response: d.response.map(ServerCapabilities::from).unwrap_or_default(),
            }),
            D::GetActionResult(d) => {
                let r = d.request.unwrap_or_default();
                Self::GetActionResult(GetActionResult {
                    request: GetActionResultRequest {
                        instance_name: non_empty(r.instance_name),
                        action_digest: r.action_digest.map(Digest::from),
                        inline_stdout: r.inline_stdout,
                        inline_stderr: r.inline_stderr,
                        inline_output_files: r.inline_output_files,
                    },
                    response: d.response.map(ActionResult::from),
                })
            }
            D::UpdateActionResult(d) => {
                let r = d.request.unwrap_or_default();
                Self::UpdateActionResult(UpdateActionResult {
                    request: UpdateActionResultRequest {
                        instance_name: non_empty(r.instance_name),
                        action_digest: r.action_digest.map(Digest::from),
                        action_result: r.action_result.map(ActionResult::from),
                        results_cache_policy: r
                            .results_cache_policy
                            .map(|p| ResultsCachePolicy {
                                priority: p.priority,
                            }),
                    },
                    response: d.response.map(ActionResult::from),
                })
            }
            D::Read(d) => {
                let r = d.request.unwrap_or_default();
                Self::Read(Read {
                    request: ReadRequest {
                        resource_name: r.resource_name,
                        read_offset: r.read_offset,
                        read_limit: r.read_limit,
                    },
                    response: ReadSummary {
                        num_reads: d.num_reads,
                        bytes_read: d.bytes_read,
                    },
                })
            }
            D::Write(d) => Self::Write(Write {
                request: WriteRequest {
                    resource_names: d.resource_names,
                    offsets: d.offsets,
                    finish_writes: d.finish_writes,
                    num_writes: d.num_writes,
                    bytes_sent: d.bytes_sent,
                },
                response: WriteResponse {
                    committed_size: d.response.map_or(0, |r| r.committed_size),
                },
            }),
            D::FindMissingBlobs(d) => Self::FindMissingBlobs(FindMissingBlobs {
                request: d
                    .request
                    .map(|r| FindMissingBlobsRequest {
                        instance_name: non_empty(r.instance_name),
                        blob_digests: digests(r.blob_digests),
                    })
                    .unwrap_or_default(),
                response: FindMissingBlobsResponse {
                    missing_blob_digests: d
                        .response
                        .map(|r| digests(r.missing_blob_digests))
                        .unwrap_or_default(),
                },
            }),
        }
    }
}

impl From<reapi::ServerCapabilities> for ServerCapabilities {
    fn from(c: reapi::ServerCapabilities) -> Self {
        Self {
            cache_capabilities: c.cache_capabilities.map(|cc| CacheCapabilities {
                digest_functions: cc
                    .digest_functions
                    .into_iter()
                    .map(digest_function_name)
                    .collect(),
                update_enabled: cc
                    .action_cache_update_capabilities
                    .is_some_and(|u| u.update_enabled),
                max_batch_total_size_bytes: cc.max_batch_total_size_bytes,
                symlink_absolute_path_strategy: cc.symlink_absolute_path_strategy,
                supported_compressors: cc
                    .supported_compressors
                    .into_iter()
                    .map(compressor_name)
                    .collect(),
            }),
            execution_capabilities: c.execution_capabilities.map(|ec| ExecutionCapabilities {
                digest_function: digest_function_name(ec.digest_function),
                exec_enabled: ec.exec_enabled,
                digest_functions: ec
                    .digest_functions
                    .into_iter()
                    .map(digest_function_name)
                    .collect(),
            }),
            deprecated_api_version: c.deprecated_api_version.map(SemVer::from),
            low_api_version: c.low_api_version.map(SemVer::from),
            high_api_version: c.high_api_version.map(SemVer::from),
        }
    }
}

impl From<semver::SemVer> for SemVer {
    fn from(v: semver::SemVer) -> Self {
        Self {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            prerelease: v.prerelease,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bzlcache_remote::proto::google::rpc::Status;

    fn entry_with(details: wire::rpc_call_details::Details) -> wire::LogEntry {
        wire::LogEntry {
            details: Some(wire::RpcCallDetails {
                details: Some(details),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_envelope_fields() {
        let entry = wire::LogEntry {
            start_time: Some(prost_types::Timestamp {
                seconds: 1_700_000_000,
                nanos: 0,
            }),
            end_time: Some(prost_types::Timestamp {
                seconds: 1_700_000_000,
                nanos: 250_000_000,
            }),
            status: Some(Status {
                code: 5,
                message: "missing".to_string(),
                details: vec![],
            }),
            metadata: Some(reapi::RequestMetadata {
                tool_details: Some(reapi::ToolDetails {
                    tool_name: "bazel".to_string(),
                    tool_version: "7.1.0".to_string(),
                }),
                tool_invocation_id: "inv-1".to_string(),
                target_id: "//app:bin".to_string(),
                ..Default::default()
            }),
            method_name: "build.bazel.remote.execution.v2.ActionCache/GetActionResult".to_string(),
            details: None,
        };

        let event = LogEvent::from(entry);
        assert_eq!(event.status.code, 5);
        assert_eq!(event.status.message, "missing");
        assert_eq!(event.metadata.tool_name, "bazel");
        assert_eq!(event.metadata.invocation_id, "inv-1");
        assert_eq!(event.metadata.target_id.as_deref(), Some("//app:bin"));
        assert_eq!(event.metadata.action_id, None);
        assert_eq!(event.duration(), Some(TimeDelta::milliseconds(250)));
        assert_eq!(
            event.service_and_method(),
            ("build.bazel.remote.execution.v2.ActionCache", "GetActionResult")
        );
        assert!(event.details.is_none());
        assert_eq!(event.kind(), None);
    }

    #[test]
    fn test_default_entry_is_empty_event() {
        let event = LogEvent::from(wire::LogEntry::default());
        assert_eq!(event, LogEvent::default());
        assert_eq!(event.duration(), None);
        assert_eq!(event.service_and_method(), ("", ""));
    }

    #[test]
    fn test_get_action_result_miss_has_no_response() {
        let event = LogEvent::from(entry_with(
            wire::rpc_call_details::Details::GetActionResult(wire::GetActionResultDetails {
                request: Some(reapi::GetActionResultRequest {
                    instance_name: String::new(),
                    action_digest: Some(reapi::Digest {
                        hash: "abc".to_string(),
                        size_bytes: 140,
                    }),
                    inline_stdout: true,
                    ..Default::default()
                }),
                response: None,
            }),
        ));

        let Some(EventDetails::GetActionResult(gar)) = event.details else {
            panic!("expected GetActionResult");
        };
        assert_eq!(gar.request.instance_name, None);
        assert_eq!(gar.request.action_digest, Some(Digest::new("abc", 140)));
        assert!(gar.request.inline_stdout);
        assert!(gar.response.is_none());
    }

    #[test]
    fn test_write_details() {
        let event = LogEvent::from(entry_with(wire::rpc_call_details::Details::Write(
            wire::WriteDetails {
                resource_names: vec!["uploads/u/blobs/abc/10".to_string()],
                offsets: vec![0, 5],
                finish_writes: vec![false, true],
                num_writes: 2,
                bytes_sent: 10,
                response: Some(bzlcache_remote::proto::google::bytestream::WriteResponse {
                    committed_size: 10,
                }),
            },
        )));

        assert_eq!(event.kind(), Some("Write"));
        let Some(EventDetails::Write(w)) = event.details else {
            panic!("expected Write");
        };
        assert_eq!(w.request.offsets, vec![0, 5]);
        assert_eq!(w.request.finish_writes, vec![false, true]);
        assert_eq!(w.response.committed_size, 10);
    }

    #[test]
    fn test_capabilities_details() {
        let event = LogEvent::from(entry_with(
            wire::rpc_call_details::Details::GetCapabilities(wire::GetCapabilitiesDetails {
                request: Some(reapi::GetCapabilitiesRequest {
                    instance_name: "main".to_string(),
                }),
                response: Some(reapi::ServerCapabilities {
                    cache_capabilities: Some(reapi::CacheCapabilities {
                        digest_functions: vec![1],
                        action_cache_update_capabilities: Some(
                            reapi::ActionCacheUpdateCapabilities {
                                update_enabled: true,
                            },
                        ),
                        supported_compressors: vec![1],
                        ..Default::default()
                    }),
                    low_api_version: Some(semver::SemVer {
                        major: 2,
                        minor: 0,
                        patch: 0,
                        prerelease: String::new(),
                    }),
                    high_api_version: Some(semver::SemVer {
                        major: 2,
                        minor: 3,
                        patch: 1,
                        prerelease: "-rc".to_string(),
                    }),
                    ..Default::default()
                }),
            }),
        ));

        let Some(EventDetails::GetCapabilities(gc)) = event.details else {
            panic!("expected GetCapabilities");
        };
        assert_eq!(gc.request.instance_name.as_deref(), Some("main"));
        let cache = gc.response.cache_capabilities.unwrap();
        assert_eq!(cache.digest_functions, vec!["SHA256"]);
        assert_eq!(cache.supported_compressors, vec!["ZSTD"]);
        assert!(cache.update_enabled);
        assert_eq!(gc.response.low_api_version.unwrap().to_string(), "2.0");
        assert_eq!(gc.response.high_api_version.unwrap().to_string(), "2.3.1-rc");
        assert!(gc.response.execution_capabilities.is_none());
    }

    #[test]
    fn test_find_missing_blobs_without_response() {
        let event = LogEvent::from(entry_with(
            wire::rpc_call_details::Details::FindMissingBlobs(wire::FindMissingBlobsDetails {
                request: Some(reapi::FindMissingBlobsRequest {
                    instance_name: String::new(),
                    blob_digests: vec![reapi::Digest {
                        hash: "a".to_string(),
                        size_bytes: 1,
                    }],
                }),
                response: None,
            }),
        ));

        let Some(EventDetails::FindMissingBlobs(fmb)) = event.details else {
            panic!("expected FindMissingBlobs");
        };
        assert_eq!(fmb.request.blob_digests, vec![Digest::new("a", 1)]);
        assert!(fmb.response.missing_blob_digests.is_empty());
    }

    #[test]
    fn test_negative_nanos_drop_timestamp() {
        assert_eq!(
            timestamp(Some(prost_types::Timestamp {
                seconds: 0,
                nanos: -1
            })),
            None
        );
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(digest_function_name(9), "BLAKE3");
        assert_eq!(digest_function_name(42), "42");
        assert_eq!(compressor_name(0), "IDENTITY");
    }
}
