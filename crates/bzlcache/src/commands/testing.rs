//! In-memory cache service for command tests

use async_trait::async_trait;
use bzlcache_remote::CacheService;
use bzlcache_remote::proto::google::rpc::Status;
use bzlcache_remote::reapi;
use std::collections::HashMap;

#[derive(Default)]
pub struct FakeCache {
    pub action_results: HashMap<String, reapi::ActionResult>,
    pub blobs: HashMap<String, Vec<u8>>,
}

#[async_trait]
impl CacheService for FakeCache {
    async fn get_action_result(
        &self,
        request: reapi::GetActionResultRequest,
    ) -> Result<reapi::ActionResult, tonic::Status> {
        let hash = request.action_digest.unwrap_or_default().hash;
        self.action_results
            .get(&hash)
            .cloned()
            .ok_or_else(|| tonic::Status::not_found(format!("{hash} not in action cache")))
    }

    async fn batch_read_blobs(
        &self,
        request: reapi::BatchReadBlobsRequest,
    ) -> Result<reapi::BatchReadBlobsResponse, tonic::Status> {
        let responses = request
            .digests
            .into_iter()
            .map(|digest| {
                let (data, code) = match self.blobs.get(&digest.hash) {
                    Some(data) => (data.clone(), tonic::Code::Ok),
                    None => (Vec::new(), tonic::Code::NotFound),
                };
                reapi::batch_read_blobs_response::Response {
                    digest: Some(digest),
                    data,
                    status: Some(Status {
                        code: code as i32,
                        message: String::new(),
                        details: vec![],
                    }),
                }
            })
            .collect();
        Ok(reapi::BatchReadBlobsResponse { responses })
    }
}
