//! The two remote cache RPCs the client needs, behind a trait

use crate::channel::{AuthInterceptor, GrpcChannel};
use crate::reapi;
use crate::reapi::action_cache_client::ActionCacheClient;
use crate::reapi::content_addressable_storage_client::ContentAddressableStorageClient;
use async_trait::async_trait;
use tonic::Request;
use tonic::codegen::InterceptedService;
use tonic::transport::Channel;

/// Raw remote cache calls.
///
/// Implementations return the wire messages untouched; classification of
/// statuses and shape checks live in [`crate::RemoteCacheClient`].
#[async_trait]
pub trait CacheService: Send + Sync {
    /// `ActionCache.GetActionResult`
    async fn get_action_result(
        &self,
        request: reapi::GetActionResultRequest,
    ) -> Result<reapi::ActionResult, tonic::Status>;

    /// `ContentAddressableStorage.BatchReadBlobs`
    async fn batch_read_blobs(
        &self,
        request: reapi::BatchReadBlobsRequest,
    ) -> Result<reapi::BatchReadBlobsResponse, tonic::Status>;
}

type Intercepted = InterceptedService<Channel, AuthInterceptor>;

/// [`CacheService`] over a tonic channel
#[derive(Clone)]
pub struct GrpcCacheService {
    action_cache: ActionCacheClient<Intercepted>,
    cas: ContentAddressableStorageClient<Intercepted>,
}

impl GrpcCacheService {
    /// Create both service clients from a shared channel
    pub fn from_channel(channel: &GrpcChannel) -> Self {
        let intercepted =
            InterceptedService::new(channel.channel(), channel.auth_interceptor());
        Self {
            action_cache: ActionCacheClient::new(intercepted.clone()),
            cas: ContentAddressableStorageClient::new(intercepted),
        }
    }
}

#[async_trait]
impl CacheService for GrpcCacheService {
    async fn get_action_result(
        &self,
        request: reapi::GetActionResultRequest,
    ) -> Result<reapi::ActionResult, tonic::Status> {
        let mut client = self.action_cache.clone();
        let response = client.get_action_result(Request::new(request)).await?;
        Ok(response.into_inner())
    }

    async fn batch_read_blobs(
        &self,
        request: reapi::BatchReadBlobsRequest,
    ) -> Result<reapi::BatchReadBlobsResponse, tonic::Status> {
        let mut client = self.cas.clone();
        let response = client.batch_read_blobs(Request::new(request)).await?;
        Ok(response.into_inner())
    }
}
