use crate::access::{resolve_access, ResolverContext};
use crate::config::{AccessConfig, ClientIdentity, EnvSource};
use crate::transport::{HttpMethod, Transport, TransportError};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Dialect-aware client for OpenAI-compatible providers.
///
/// Holds only shared, immutable collaborators; every operation takes its own
/// [`AccessConfig`] so one client can serve many callers and dialects.
#[derive(Debug, Clone)]
pub struct CompatClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) env: Arc<dyn EnvSource>,
    pub(crate) identity: ClientIdentity,
}

impl CompatClient {
    /// Start building a client. See [`CompatClientBuilder`](crate::client::CompatClientBuilder).
    pub fn builder() -> crate::client::CompatClientBuilder {
        crate::client::CompatClientBuilder::new()
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Resolve access for `api_path` and perform one request.
    pub(crate) async fn call<B: Serialize>(
        &self,
        config: &AccessConfig,
        model_ref: Option<&str>,
        method: HttpMethod,
        api_path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let access = resolve_access(
            config,
            ResolverContext {
                env: self.env.as_ref(),
                identity: &self.identity,
            },
            model_ref,
            api_path,
        )?;
        let body = body.map(serde_json::to_value).transpose()?;

        debug!(
            dialect = %config.dialect,
            method = %method,
            path = access.path(),
            "sending provider request"
        );
        self.transport
            .request(method, &access.url, &access.headers, body.as_ref())
            .await
            .map_err(caller_facing)
    }
}

/// A reset connection means the caller went away; any other transport failure
/// is reported as a bad request carrying the upstream message.
pub(crate) fn caller_facing(err: TransportError) -> Error {
    if err.is_connection_reset() {
        Error::ClientClosedRequest {
            message: err.message,
        }
    } else {
        Error::BadRequest {
            message: err.message,
        }
    }
}
