use crate::client::core::CompatClient;
use crate::config::{ClientIdentity, EnvSource, ProcessEnv};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::sync::Arc;

/// Builder for [`CompatClient`].
///
/// Defaults: [`HttpTransport::from_env`], the process environment for
/// credential fallbacks and [`ClientIdentity::default`].
#[derive(Debug, Default)]
pub struct CompatClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    env: Option<Arc<dyn EnvSource>>,
    identity: Option<ClientIdentity>,
}

impl CompatClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a transport (mock servers, recording stubs, custom HTTP stacks).
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Source for server-side fallback keys and hosts.
    pub fn env(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn build(self) -> Result<CompatClient> {
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::from_env()?),
        };
        Ok(CompatClient {
            transport,
            env: self.env.unwrap_or_else(|| Arc::new(ProcessEnv)),
            identity: self.identity.unwrap_or_default(),
        })
    }
}
