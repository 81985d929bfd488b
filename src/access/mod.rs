//! Access resolution: turns an [`AccessConfig`] plus a target API path into the
//! fully qualified URL and headers for one request.
//!
//! | Dialect | Auth | Notes |
//! |---------|------|-------|
//! | azure | `api-key` | deployment-scoped paths, pinned api-version |
//! | openai, lmstudio, localai, oobabooga | bearer (optional) | Helicone proxy, Cloudflare gateway |
//! | mistral | bearer | `Accept: application/json` |
//! | openrouter | bearer | `HTTP-Referer` and `X-Title` product headers |
//! | togetherai | bearer | `Accept: application/json` |

mod host;

pub use host::{fixup_host, CLOUDFLARE_GATEWAY_HOST, HELICONE_OPENAI_HOST};
use host::KeyOrigin;

use crate::config::{AccessConfig, ClientIdentity, EnvSource};
use crate::dialect::{Dialect, OPENAI_DEFAULT_HOST};
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use tracing::debug;

pub const AZURE_API_VERSION: &str = "2023-07-01-preview";

/// URL and headers for one outbound call. Never cached: hosts and keys may change per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccess {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl ResolvedAccess {
    fn new(url: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self { url, headers }
    }

    fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    fn bearer(self, key: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", key))
    }

    /// Path and query of the resolved URL (everything after the host).
    pub fn path(&self) -> &str {
        let after_scheme = self
            .url
            .find("://")
            .map(|i| &self.url[i + 3..])
            .unwrap_or(&self.url);
        after_scheme
            .find('/')
            .map(|i| &after_scheme[i..])
            .unwrap_or("")
    }
}

/// Everything the resolver reads besides the per-request config.
#[derive(Debug, Clone, Copy)]
pub struct ResolverContext<'a> {
    pub env: &'a dyn EnvSource,
    pub identity: &'a ClientIdentity,
}

fn pick(explicit: &str, env: &dyn EnvSource, var: &str) -> Option<String> {
    let explicit = explicit.trim();
    if explicit.is_empty() {
        env.non_empty(var)
    } else {
        Some(explicit.to_string())
    }
}

/// Caller key first; the shared server key only when the caller opted in.
fn pick_opt_in_key(config: &AccessConfig, env: &dyn EnvSource, var: &str) -> String {
    let own = config.api_key.trim();
    if !own.is_empty() {
        return own.to_string();
    }
    if config.use_shared_default_key {
        return env.non_empty(var).unwrap_or_default();
    }
    String::new()
}

fn missing(message: &str, field: &str, dialect: Dialect) -> Error {
    Error::configuration_with_context(
        message,
        ErrorContext::new()
            .with_field_path(field)
            .with_details(format!("dialect: {}", dialect))
            .with_source("access_resolver"),
    )
}

/// Resolve the URL and headers for `api_path` under `config`'s dialect.
///
/// `model_ref` is only consulted by Azure, where it names the deployment.
pub fn resolve_access(
    config: &AccessConfig,
    ctx: ResolverContext<'_>,
    model_ref: Option<&str>,
    api_path: &str,
) -> Result<ResolvedAccess> {
    let dialect = config.dialect;
    let fallbacks = dialect.env_fallbacks();
    let env = ctx.env;

    let resolved = match dialect {
        Dialect::Azure => {
            let key = pick(&config.api_key, env, fallbacks.api_key).unwrap_or_default();
            let raw_host = pick(&config.host_override, env, fallbacks.host).unwrap_or_default();
            if key.is_empty() || raw_host.is_empty() {
                return Err(missing(
                    "Missing Azure API Key or Host",
                    if key.is_empty() {
                        "access.api_key"
                    } else {
                        "access.host"
                    },
                    dialect,
                ));
            }
            let host = fixup_host(&raw_host, api_path);
            let path = azure_path(model_ref, api_path)?;
            ResolvedAccess::new(format!("{}{}", host, path)).header("api-key", key)
        }

        Dialect::OpenAi | Dialect::LmStudio | Dialect::LocalAi | Dialect::Oobabooga => {
            let key = pick_opt_in_key(config, env, fallbacks.api_key);
            let org = fallbacks
                .organization
                .and_then(|var| pick(&config.organization_id, env, var))
                .unwrap_or_default();
            let raw_host = pick(&config.host_override, env, fallbacks.host)
                .unwrap_or_else(|| OPENAI_DEFAULT_HOST.to_string());
            let host = fixup_host(&raw_host, api_path);

            // self-hosted servers may run without a key; the public endpoint may not
            if key.is_empty() && host.contains(OPENAI_DEFAULT_HOST) {
                return Err(missing("Missing OpenAI API Key", "access.api_key", dialect));
            }

            let proxy_key = if !config.proxy_key.trim().is_empty() {
                Some((config.proxy_key.trim().to_string(), KeyOrigin::Caller))
            } else {
                fallbacks
                    .proxy_key
                    .and_then(|var| env.non_empty(var))
                    .map(|key| (key, KeyOrigin::Environment))
            };
            let proxied = host::apply_proxy(host, proxy_key);

            let (host, path) = if host::is_gateway_host(&proxied.host) {
                host::gateway_passthrough(&proxied.host, api_path)?
            } else {
                (proxied.host, api_path.to_string())
            };

            let mut access = ResolvedAccess::new(format!("{}{}", host, path));
            if !key.is_empty() {
                access = access.bearer(&key);
            }
            if !org.is_empty() {
                access = access.header("OpenAI-Organization", org);
            }
            if let Some(proxy_key) = proxied.proxy_key {
                access = access.header("Helicone-Auth", format!("Bearer {}", proxy_key));
            }
            access
        }

        Dialect::Mistral => {
            // an empty key is forwarded and left for the provider to reject
            let key = pick(&config.api_key, env, fallbacks.api_key).unwrap_or_default();
            let host = dialect_host(config, env, dialect, api_path);
            ResolvedAccess::new(format!("{}{}", host, api_path))
                .header("Accept", "application/json")
                .bearer(&key)
        }

        Dialect::OpenRouter => {
            let key = pick_opt_in_key(config, env, fallbacks.api_key);
            let host = dialect_host(config, env, dialect, api_path);
            if key.is_empty() || host.is_empty() {
                return Err(missing(
                    "Missing OpenRouter API Key or Host",
                    "access.api_key",
                    dialect,
                ));
            }
            ResolvedAccess::new(format!("{}{}", host, api_path))
                .bearer(&key)
                .header("HTTP-Referer", ctx.identity.referer.clone())
                .header("X-Title", ctx.identity.title.clone())
        }

        Dialect::TogetherAi => {
            let key = pick(&config.api_key, env, fallbacks.api_key).unwrap_or_default();
            let host = dialect_host(config, env, dialect, api_path);
            if key.is_empty() || host.is_empty() {
                return Err(missing(
                    "Missing TogetherAI API Key or Host",
                    "access.api_key",
                    dialect,
                ));
            }
            ResolvedAccess::new(format!("{}{}", host, api_path))
                .header("Accept", "application/json")
                .bearer(&key)
        }
    };

    debug!(dialect = %dialect, path = resolved.path(), "resolved provider access");
    Ok(resolved)
}

fn dialect_host(config: &AccessConfig, env: &dyn EnvSource, dialect: Dialect, api_path: &str) -> String {
    let raw = pick(&config.host_override, env, dialect.env_fallbacks().host)
        .or_else(|| dialect.default_host().map(str::to_string))
        .unwrap_or_default();
    fixup_host(&raw, api_path)
}

/// Map a generic `/v1/...` path onto Azure's deployment-scoped form.
fn azure_path(model_ref: Option<&str>, api_path: &str) -> Result<String> {
    if let Some(rest) = api_path.strip_prefix("/v1/") {
        let deployment = model_ref.map(str::trim).filter(|d| !d.is_empty()).ok_or_else(|| {
            Error::configuration_with_context(
                "Azure OpenAI API needs a deployment id",
                ErrorContext::new()
                    .with_field_path("model.id")
                    .with_source("access_resolver"),
            )
        })?;
        return Ok(format!(
            "/openai/deployments/{}/{}?api-version={}",
            deployment, rest, AZURE_API_VERSION
        ));
    }
    if api_path.starts_with("/openai/deployments") {
        return Ok(api_path.to_string());
    }
    Err(Error::configuration_with_context(
        format!("Azure OpenAI API path not supported: {}", api_path),
        ErrorContext::new()
            .with_field_path("api_path")
            .with_source("access_resolver"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticEnv;

    fn resolve(
        config: &AccessConfig,
        env: &StaticEnv,
        model_ref: Option<&str>,
        path: &str,
    ) -> Result<ResolvedAccess> {
        let identity = ClientIdentity::default();
        resolve_access(
            config,
            ResolverContext {
                env,
                identity: &identity,
            },
            model_ref,
            path,
        )
    }

    #[test]
    fn test_azure_rewrites_chat_path() {
        let cfg = AccessConfig::new(Dialect::Azure)
            .with_api_key("az-key")
            .with_host("my-res.openai.azure.com/");
        let access = resolve(&cfg, &StaticEnv::new(), Some("dep1"), "/v1/chat/completions").unwrap();
        assert_eq!(
            access.path(),
            "/openai/deployments/dep1/chat/completions?api-version=2023-07-01-preview"
        );
        assert_eq!(
            access.url,
            "https://my-res.openai.azure.com/openai/deployments/dep1/chat/completions?api-version=2023-07-01-preview"
        );
        assert_eq!(access.headers.get("api-key").map(String::as_str), Some("az-key"));
        assert!(!access.headers.contains_key("Authorization"));
    }

    #[test]
    fn test_azure_passthrough_and_rejections() {
        let cfg = AccessConfig::new(Dialect::Azure)
            .with_api_key("k")
            .with_host("https://x.openai.azure.com");
        let env = StaticEnv::new();
        let listing = resolve(&cfg, &env, None, "/openai/deployments?api-version=2023-03-15-preview").unwrap();
        assert_eq!(listing.path(), "/openai/deployments?api-version=2023-03-15-preview");

        assert!(matches!(
            resolve(&cfg, &env, None, "/v1/chat/completions"),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            resolve(&cfg, &env, Some("d"), "/models"),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_azure_env_fallback() {
        let env = StaticEnv::new()
            .with("AZURE_OPENAI_API_KEY", "env-key")
            .with("AZURE_OPENAI_API_ENDPOINT", "https://env.openai.azure.com");
        let access = resolve(&AccessConfig::new(Dialect::Azure), &env, Some("d"), "/v1/chat/completions").unwrap();
        assert!(access.url.starts_with("https://env.openai.azure.com/openai/deployments/d/"));
        assert_eq!(access.headers["api-key"], "env-key");
    }

    #[test]
    fn test_required_credentials_missing() {
        let env = StaticEnv::new();
        for dialect in [Dialect::Azure, Dialect::OpenAi, Dialect::OpenRouter, Dialect::TogetherAi] {
            let err = resolve(&AccessConfig::new(dialect), &env, Some("m"), "/v1/models").unwrap_err();
            assert!(matches!(err, Error::Configuration { .. }), "{:?}", dialect);
        }
    }

    #[test]
    fn test_required_credentials_present() {
        let env = StaticEnv::new();
        for dialect in [Dialect::Azure, Dialect::OpenAi, Dialect::OpenRouter, Dialect::TogetherAi] {
            let cfg = AccessConfig::new(dialect)
                .with_api_key("key")
                .with_host("https://host.test");
            assert!(resolve(&cfg, &env, Some("m"), "/v1/models").is_ok(), "{:?}", dialect);
        }
    }

    #[test]
    fn test_local_server_without_key() {
        let cfg = AccessConfig::new(Dialect::LmStudio).with_host("http://localhost:1234");
        let access = resolve(&cfg, &StaticEnv::new(), None, "/v1/models").unwrap();
        assert_eq!(access.url, "http://localhost:1234/v1/models");
        assert!(!access.headers.contains_key("Authorization"));
    }

    #[test]
    fn test_shared_key_requires_opt_in() {
        let env = StaticEnv::new().with("OPENAI_API_KEY", "server-key");
        let cfg = AccessConfig::new(Dialect::OpenAi);
        assert!(resolve(&cfg, &env, None, "/v1/models").is_err());

        let access = resolve(&cfg.clone().use_shared_default_key(true), &env, None, "/v1/models").unwrap();
        assert_eq!(access.headers["Authorization"], "Bearer server-key");
        assert_eq!(access.url, "https://api.openai.com/v1/models");

        let own = resolve(&cfg.with_api_key("mine").use_shared_default_key(true), &env, None, "/v1/models").unwrap();
        assert_eq!(own.headers["Authorization"], "Bearer mine");
    }

    #[test]
    fn test_openai_organization_and_proxy_headers() {
        let cfg = AccessConfig::new(Dialect::OpenAi)
            .with_api_key("sk")
            .with_organization("org-1")
            .with_proxy_key("helicone");
        let access = resolve(&cfg, &StaticEnv::new(), None, "/v1/chat/completions").unwrap();
        assert_eq!(access.url, "https://oai.hconeai.com/v1/chat/completions");
        assert_eq!(access.headers["OpenAI-Organization"], "org-1");
        assert_eq!(access.headers["Helicone-Auth"], "Bearer helicone");
    }

    #[test]
    fn test_proxy_key_dropped_for_custom_host() {
        let cfg = AccessConfig::new(Dialect::LocalAi)
            .with_host("http://localhost:8080")
            .with_proxy_key("helicone");
        let access = resolve(&cfg, &StaticEnv::new(), None, "/v1/models").unwrap();
        assert_eq!(access.url, "http://localhost:8080/v1/models");
        assert!(!access.headers.contains_key("Helicone-Auth"));
    }

    #[test]
    fn test_environment_proxy_key_only_for_default_host() {
        let env = StaticEnv::new().with("HELICONE_API_KEY", "server-hk");
        let local = AccessConfig::new(Dialect::LocalAi).with_host("http://localhost:8080");
        let access = resolve(&local, &env, None, "/v1/models").unwrap();
        assert_eq!(access.url, "http://localhost:8080/v1/models");
        assert!(!access.headers.contains_key("Helicone-Auth"));

        let openai = AccessConfig::new(Dialect::OpenAi).with_api_key("sk");
        let access = resolve(&openai, &env, None, "/v1/models").unwrap();
        assert_eq!(access.url, "https://oai.hconeai.com/v1/models");
        assert_eq!(access.headers["Helicone-Auth"], "Bearer server-hk");
    }

    #[test]
    fn test_cloudflare_gateway() {
        let cfg = AccessConfig::new(Dialect::OpenAi)
            .with_api_key("sk")
            .with_host("https://gateway.ai.cloudflare.com/v1/acct1/gw1/openai");
        let access = resolve(&cfg, &StaticEnv::new(), None, "/v1/chat/completions").unwrap();
        assert_eq!(access.path(), "/v1/acct1/gw1/openai/chat/completions");
        assert_eq!(
            access.url,
            "https://gateway.ai.cloudflare.com/v1/acct1/gw1/openai/chat/completions"
        );

        let bad = cfg.with_host("https://gateway.ai.cloudflare.com/v1/acct1");
        assert!(matches!(
            resolve(&bad, &StaticEnv::new(), None, "/v1/chat/completions"),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_mistral_allows_empty_key() {
        let access = resolve(&AccessConfig::new(Dialect::Mistral), &StaticEnv::new(), None, "/v1/models").unwrap();
        assert_eq!(access.url, "https://api.mistral.ai/v1/models");
        assert_eq!(access.headers["Accept"], "application/json");
        assert_eq!(access.headers["Authorization"], "Bearer ");
    }

    #[test]
    fn test_openrouter_product_headers() {
        let cfg = AccessConfig::new(Dialect::OpenRouter).with_api_key("or-key");
        let access = resolve(&cfg, &StaticEnv::new(), None, "/v1/models").unwrap();
        assert_eq!(access.url, "https://openrouter.ai/api/v1/models");
        let identity = ClientIdentity::default();
        assert_eq!(access.headers["HTTP-Referer"], identity.referer);
        assert_eq!(access.headers["X-Title"], identity.title);
    }

    #[test]
    fn test_togetherai_env_key() {
        let env = StaticEnv::new().with("TOGETHERAI_API_KEY", "tg");
        let access = resolve(&AccessConfig::new(Dialect::TogetherAi), &env, None, "/v1/models").unwrap();
        assert_eq!(access.url, "https://api.together.xyz/v1/models");
        assert_eq!(access.headers["Authorization"], "Bearer tg");
        assert_eq!(access.headers["Accept"], "application/json");
    }
}
