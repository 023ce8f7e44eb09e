//! gRPC channel setup for the remote cache

use crate::config::{AuthConfig, RemoteConfig};
use crate::error::{RemoteError, Result};
use tonic::metadata::{AsciiMetadataValue, MetadataMap};
use tonic::service::Interceptor;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tracing::{debug, info};

/// Established gRPC channel to a remote cache
#[derive(Clone)]
pub struct GrpcChannel {
    inner: Channel,
    auth: AuthInterceptor,
    instance_name: String,
}

impl GrpcChannel {
    /// Connect to the configured endpoint.
    ///
    /// The whole setup, TLS handshake included, is bounded by
    /// [`RemoteConfig::connect_timeout`]; running out of it is a
    /// [`RemoteError::Connection`].
    pub async fn connect(config: &RemoteConfig) -> Result<Self> {
        let endpoint = create_endpoint(config)?;
        let auth = AuthInterceptor::new(config)?;
        let budget = config.connect_timeout();

        info!(
            endpoint = %config.endpoint,
            timeout_secs = config.connect_timeout_secs,
            "Connecting to remote cache"
        );

        let channel = tokio::time::timeout(budget, endpoint.connect())
            .await
            .map_err(|_| {
                RemoteError::connection_failed(
                    &config.endpoint,
                    format!("timed out after {}s", budget.as_secs()),
                )
            })?
            .map_err(|e| RemoteError::connection_failed(&config.endpoint, e.to_string()))?;

        debug!("Successfully connected to remote cache");

        Ok(Self {
            inner: channel,
            auth,
            instance_name: config.instance_name.clone(),
        })
    }

    /// Get the raw channel for creating service clients
    pub fn channel(&self) -> Channel {
        self.inner.clone()
    }

    /// Interceptor carrying the configured credentials
    pub fn auth_interceptor(&self) -> AuthInterceptor {
        self.auth.clone()
    }

    /// Get the instance name for requests
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }
}

/// Interceptor that adds authentication headers to requests
#[derive(Clone, Default)]
pub struct AuthInterceptor {
    authorization: Option<AsciiMetadataValue>,
}

impl AuthInterceptor {
    /// Create a new auth interceptor from config.
    ///
    /// A token that cannot travel as an ASCII header value is a
    /// [`RemoteError::Configuration`].
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let authorization = match &config.auth {
            None => None,
            Some(AuthConfig::Bearer { token }) => Some(
                AsciiMetadataValue::try_from(format!("Bearer {token}")).map_err(|_| {
                    RemoteError::config_error(
                        "bearer token contains characters not allowed in a header",
                    )
                })?,
            ),
        };

        Ok(Self { authorization })
    }

    /// Apply auth headers to a metadata map
    pub fn apply_to_metadata(&self, metadata: &mut MetadataMap) {
        if let Some(header) = &self.authorization {
            metadata.insert("authorization", header.clone());
        }
    }
}

impl Interceptor for AuthInterceptor {
    fn call(
        &mut self,
        mut request: tonic::Request<()>,
    ) -> std::result::Result<tonic::Request<()>, tonic::Status> {
        self.apply_to_metadata(request.metadata_mut());
        Ok(request)
    }
}

/// Turn the configured endpoint into a URI tonic understands.
///
/// `grpc://` maps to plaintext HTTP/2, `grpcs://` to TLS, and a bare
/// `host:port` is plaintext.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if let Some(rest) = endpoint.strip_prefix("grpcs://") {
        format!("https://{rest}")
    } else if let Some(rest) = endpoint.strip_prefix("grpc://") {
        format!("http://{rest}")
    } else if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}

/// Create a tonic Endpoint from RemoteConfig
fn create_endpoint(config: &RemoteConfig) -> Result<Endpoint> {
    if config.endpoint.is_empty() {
        return Err(RemoteError::config_error("remote cache address not given"));
    }

    let uri = normalize_endpoint(&config.endpoint);

    debug!(original = %config.endpoint, normalized = %uri, "Normalizing endpoint URL");

    let mut endpoint = Endpoint::from_shared(uri.clone()).map_err(|e| {
        RemoteError::config_error(format!("Invalid endpoint '{}': {}", config.endpoint, e))
    })?;

    endpoint = endpoint
        .user_agent(config.user_agent.clone())
        .map_err(|e| RemoteError::config_error(format!("Invalid user agent: {e}")))?
        .connect_timeout(config.connect_timeout());

    if uri.starts_with("https://") {
        let tls = ClientTlsConfig::new().with_native_roots();
        endpoint = endpoint
            .tls_config(tls)
            .map_err(|e| RemoteError::config_error(format!("TLS configuration error: {e}")))?;
    }

    Ok(endpoint)
}
