// Hand-written prost messages for the `remote_logging` package. Tags follow
// `src/main/protobuf/remote_execution_log.proto` in Bazel.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LogEntry {
    #[prost(message, optional, tag = "1")]
    pub start_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "2")]
    pub end_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "3")]
    pub status: ::core::option::Option<::bzlcache_remote::proto::google::rpc::Status>,
    #[prost(message, optional, tag = "4")]
    pub metadata: ::core::option::Option<::bzlcache_remote::reapi::RequestMetadata>,
    #[prost(string, tag = "5")]
    pub method_name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "6")]
    pub details: ::core::option::Option<RpcCallDetails>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetActionResultDetails {
    #[prost(message, optional, tag = "1")]
    pub request: ::core::option::Option<::bzlcache_remote::reapi::GetActionResultRequest>,
    #[prost(message, optional, tag = "2")]
    pub response: ::core::option::Option<::bzlcache_remote::reapi::ActionResult>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FindMissingBlobsDetails {
    #[prost(message, optional, tag = "1")]
    pub request: ::core::option::Option<::bzlcache_remote::reapi::FindMissingBlobsRequest>,
    #[prost(message, optional, tag = "2")]
    pub response: ::core::option::Option<::bzlcache_remote::reapi::FindMissingBlobsResponse>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadDetails {
    #[prost(message, optional, tag = "1")]
    pub request: ::core::option::Option<::bzlcache_remote::proto::google::bytestream::ReadRequest>,
    #[prost(int64, tag = "2")]
    pub num_reads: i64,
    #[prost(int64, tag = "3")]
    pub bytes_read: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WriteDetails {
    #[prost(string, repeated, tag = "1")]
    pub resource_names: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(int64, repeated, tag = "3")]
    pub offsets: ::prost::alloc::vec::Vec<i64>,
    #[prost(bool, repeated, tag = "4")]
    pub finish_writes: ::prost::alloc::vec::Vec<bool>,
    #[prost(int64, tag = "5")]
    pub num_writes: i64,
    #[prost(int64, tag = "6")]
    pub bytes_sent: i64,
    #[prost(message, optional, tag = "2")]
    pub response: ::core::option::Option<::bzlcache_remote::proto::google::bytestream::WriteResponse>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetCapabilitiesDetails {
    #[prost(message, optional, tag = "1")]
    pub request: ::core::option::Option<::bzlcache_remote::reapi::GetCapabilitiesRequest>,
    #[prost(message, optional, tag = "2")]
    pub response: ::core::option::Option<::bzlcache_remote::reapi::ServerCapabilities>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateActionResultDetails {
    #[prost(message, optional, tag = "1")]
    pub request: ::core::option::Option<::bzlcache_remote::reapi::UpdateActionResultRequest>,
    #[prost(message, optional, tag = "2")]
    pub response: ::core::option::Option<::bzlcache_remote::reapi::ActionResult>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcCallDetails {
    #[prost(oneof = "rpc_call_details::Details", tags = "3, 5, 6, 7, 8, 10")]
    pub details: ::core::option::Option<rpc_call_details::Details>,
}
/// Nested message and enum types in `RpcCallDetails`.
pub mod rpc_call_details {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Details {
        #[prost(message, tag = "3")]
        GetActionResult(super::GetActionResultDetails),
        #[prost(message, tag = "5")]
        FindMissingBlobs(super::FindMissingBlobsDetails),
        #[prost(message, tag = "6")]
        Read(super::ReadDetails),
        #[prost(message, tag = "7")]
        Write(super::WriteDetails),
        #[prost(message, tag = "8")]
        GetCapabilities(super::GetCapabilitiesDetails),
        #[prost(message, tag = "10")]
        UpdateActionResult(super::UpdateActionResultDetails),
    }
}
