//! Per-request access configuration and the environment fallback source.

use crate::dialect::Dialect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Caller-supplied credentials for one request. Empty strings mean "not provided".
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessConfig {
    pub dialect: Dialect,
    pub api_key: String,
    pub organization_id: String,
    pub host_override: String,
    /// Observability-proxy (Helicone) key.
    pub proxy_key: String,
    pub use_shared_default_key: bool,
    pub moderation_enabled: bool,
}

impl AccessConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization_id = org.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host_override = host.into();
        self
    }

    pub fn with_proxy_key(mut self, key: impl Into<String>) -> Self {
        self.proxy_key = key.into();
        self
    }

    pub fn use_shared_default_key(mut self, enable: bool) -> Self {
        self.use_shared_default_key = enable;
        self
    }

    pub fn moderation(mut self, enable: bool) -> Self {
        self.moderation_enabled = enable;
        self
    }
}

// Keys never reach logs through Debug.
impl fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(s: &str) -> &'static str {
            if s.is_empty() {
                "<empty>"
            } else {
                "<redacted>"
            }
        }
        f.debug_struct("AccessConfig")
            .field("dialect", &self.dialect)
            .field("api_key", &redact(&self.api_key))
            .field("organization_id", &self.organization_id)
            .field("host_override", &self.host_override)
            .field("proxy_key", &redact(&self.proxy_key))
            .field("use_shared_default_key", &self.use_shared_default_key)
            .field("moderation_enabled", &self.moderation_enabled)
            .finish()
    }
}

/// Source of server-side fallback values (API keys, hosts).
pub trait EnvSource: Send + Sync + fmt::Debug {
    fn get(&self, name: &str) -> Option<String>;

    /// Non-empty value or `None`.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Map-backed environment, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for StaticEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// How this application identifies itself to providers that ask for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    /// Sent as `HTTP-Referer` to OpenRouter.
    pub referer: String,
    /// Sent as `X-Title` to OpenRouter.
    pub title: String,
    /// End-user identifier attached to image generation requests.
    pub user: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            referer: "https://github.com/ailib-official/ai-lib-openai-compat".to_string(),
            title: "ai-lib-openai-compat".to_string(),
            user: "ai-lib-openai-compat".to_string(),
        }
    }
}
