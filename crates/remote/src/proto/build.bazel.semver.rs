// Hand-written prost messages for `build/bazel/semver/semver.proto`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SemVer {
    #[prost(int32, tag = "1")]
    pub major: i32,
    #[prost(int32, tag = "2")]
    pub minor: i32,
    #[prost(int32, tag = "3")]
    pub patch: i32,
    #[prost(string, tag = "4")]
    pub prerelease: ::prost::alloc::string::String,
}
