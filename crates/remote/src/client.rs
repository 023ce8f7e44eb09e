//! Digest-addressed retrieval from a remote cache

use crate::channel::GrpcChannel;
use crate::config::RemoteConfig;
use crate::digest::Digest;
use crate::error::{RemoteError, Result};
use crate::model::ActionResult;
use crate::reapi;
use crate::service::{CacheService, GrpcCacheService};
use tracing::{debug, instrument};

/// Size sent with action digests; the action cache is keyed by hash only.
pub const ACTION_DIGEST_PLACEHOLDER_SIZE: i64 = 1;

/// Read-only client for an action cache and its content addressable storage
pub struct RemoteCacheClient<S = GrpcCacheService> {
    service: S,
    instance_name: String,
}

impl RemoteCacheClient<GrpcCacheService> {
    /// Connect to the cache described by `config`.
    ///
    /// Fails with [`RemoteError::Connection`] before any lookup is attempted
    /// if the channel cannot be set up within the configured budget.
    pub async fn connect(config: &RemoteConfig) -> Result<Self> {
        let channel = GrpcChannel::connect(config).await?;
        Ok(Self::new(
            GrpcCacheService::from_channel(&channel),
            channel.instance_name(),
        ))
    }
}

impl<S: CacheService> RemoteCacheClient<S> {
    /// Wrap an existing service
    pub fn new(service: S, instance_name: impl Into<String>) -> Self {
        Self {
            service,
            instance_name: instance_name.into(),
        }
    }

    /// Instance name sent with every request
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Look up the action result cached for an action hash.
    #[instrument(skip(self), fields(instance = %self.instance_name))]
    pub async fn get_action_result(&self, hash: &str) -> Result<ActionResult> {
        let request = reapi::GetActionResultRequest {
            instance_name: self.instance_name.clone(),
            action_digest: Some(reapi::Digest {
                hash: hash.to_string(),
                size_bytes: ACTION_DIGEST_PLACEHOLDER_SIZE,
            }),
            ..Default::default()
        };

        let result = self
            .service
            .get_action_result(request)
            .await
            .map_err(|status| {
                RemoteError::from_status(&status, &format!("action result {hash}"))
            })?;

        debug!(
            outputs = result.output_files.len(),
            exit_code = result.exit_code,
            "Action result retrieved"
        );
        Ok(ActionResult::from(result))
    }

    /// Read one blob through a single-digest batch read.
    ///
    /// The batch answer must hold exactly one entry; anything else is a
    /// [`RemoteError::Protocol`], whatever the entries' statuses.
    #[instrument(skip(self), fields(instance = %self.instance_name, digest = %digest))]
    pub async fn get_blob(&self, digest: &Digest) -> Result<Vec<u8>> {
        let what = format!("blob {digest}");
        let request = reapi::BatchReadBlobsRequest {
            instance_name: self.instance_name.clone(),
            digests: vec![reapi::Digest::from(digest)],
        };

        let response = self
            .service
            .batch_read_blobs(request)
            .await
            .map_err(|status| RemoteError::from_status(&status, &what))?;

        let mut responses = response.responses;
        if responses.len() != 1 {
            return Err(RemoteError::protocol(format!(
                "cache did not return exactly one response for one request (got {})",
                responses.len()
            )));
        }
        let entry = responses.remove(0);

        // A missing status message means OK
        let status = entry.status.unwrap_or_default();
        if status.code == i32::from(tonic::Code::Ok) {
            debug!(bytes = entry.data.len(), "Blob retrieved");
            Ok(entry.data)
        } else {
            Err(RemoteError::from_status_code(
                status.code,
                status.message,
                &what,
            ))
        }
    }

    /// Look up several action results, strictly in input order.
    ///
    /// Each input is either a bare hash or a full `<hash>/<size>` digest.
    /// One failing input never stops the others.
    pub async fn get_action_results<I, T>(&self, inputs: I) -> Report<ActionResult>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut report = Report::default();
        for input in inputs {
            let input = input.into();
            let result = match action_hash(&input) {
                Ok(hash) => self.get_action_result(&hash).await,
                Err(e) => Err(e),
            };
            report.push(input, result);
        }
        report
    }

    /// Read several blobs, strictly in input order.
    pub async fn get_blobs<I, T>(&self, inputs: I) -> Report<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut report = Report::default();
        for input in inputs {
            let input = input.into();
            let result = match Digest::parse(&input) {
                Ok(digest) => self.get_blob(&digest).await,
                Err(e) => Err(e),
            };
            report.push(input, result);
        }
        report
    }
}

/// Hash to look up for an action cache input.
///
/// Text containing `/` must be a well-formed digest; anything else is taken
/// as the hash itself.
pub fn action_hash(input: &str) -> Result<String> {
    if input.contains('/') {
        Digest::parse(input).map(|d| d.hash)
    } else {
        Ok(input.to_string())
    }
}

/// What happened to one input of a multi-item retrieval
#[derive(Debug)]
pub struct Outcome<T> {
    /// The input exactly as given
    pub input: String,
    /// Payload or classified error
    pub result: Result<T>,
}

/// Ordered outcomes of a multi-item retrieval
#[derive(Debug)]
pub struct Report<T> {
    outcomes: Vec<Outcome<T>>,
}

impl<T> Default for Report<T> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

impl<T> Report<T> {
    fn push(&mut self, input: String, result: Result<T>) {
        if let Err(e) = &result {
            debug!(input = %input, error = %e, "Retrieval failed");
        }
        self.outcomes.push(Outcome { input, result });
    }

    /// Outcomes in input order
    pub fn outcomes(&self) -> &[Outcome<T>] {
        &self.outcomes
    }

    /// Number of failed inputs
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Whether the overall command must report failure
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Number of inputs
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no input was given
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl<T> IntoIterator for Report<T> {
    type Item = Outcome<T>;
    type IntoIter = std::vec::IntoIter<Outcome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
