//! Host normalization and the two host rewrites of the OpenAI family:
//! the Helicone observability proxy and the Cloudflare AI Gateway passthrough.

use crate::dialect::OPENAI_DEFAULT_HOST;
use crate::{Error, ErrorContext, Result};
use tracing::{debug, warn};
use url::Url;

pub const HELICONE_OPENAI_HOST: &str = "oai.hconeai.com";
pub const CLOUDFLARE_GATEWAY_HOST: &str = "gateway.ai.cloudflare.com";

/// Canonicalize a raw host against the API path it will be joined with.
///
/// Adds `https://` when no scheme is present and drops trailing `/` when the
/// path already starts with one. An empty host stays empty. Idempotent.
pub fn fixup_host(raw_host: &str, api_path: &str) -> String {
    let host = raw_host.trim();
    if host.is_empty() {
        return String::new();
    }
    let host = if host.starts_with("http") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };
    if api_path.starts_with('/') {
        host.trim_end_matches('/').to_string()
    } else {
        host
    }
}

/// Outcome of applying the proxy key to a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProxiedHost {
    pub host: String,
    pub proxy_key: Option<String>,
}

/// Where a proxy key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyOrigin {
    /// Set on the caller's `AccessConfig`.
    Caller,
    /// Read from the server environment.
    Environment,
}

/// Route default-host traffic through Helicone when a proxy key is present.
///
/// A key paired with any other host is dropped, not rejected. Dropping a
/// caller-supplied key warns; dropping the environment key does not.
pub(crate) fn apply_proxy(host: String, proxy_key: Option<(String, KeyOrigin)>) -> ProxiedHost {
    let Some((key, origin)) = proxy_key else {
        return ProxiedHost {
            host,
            proxy_key: None,
        };
    };
    if host.contains(OPENAI_DEFAULT_HOST) {
        ProxiedHost {
            host: format!("https://{}", HELICONE_OPENAI_HOST),
            proxy_key: Some(key),
        }
    } else if host.contains(HELICONE_OPENAI_HOST) {
        ProxiedHost {
            host,
            proxy_key: Some(key),
        }
    } else {
        match origin {
            KeyOrigin::Caller => warn!(
                host = %host,
                "proxy key ignored: host is neither the default OpenAI endpoint nor the proxy"
            ),
            KeyOrigin::Environment => debug!(host = %host, "environment proxy key not used for host"),
        }
        ProxiedHost {
            host,
            proxy_key: None,
        }
    }
}

pub(crate) fn is_gateway_host(host: &str) -> bool {
    host.contains(&format!("https://{}", CLOUDFLARE_GATEWAY_HOST))
}

/// Rewrite `(host, api_path)` to pass through a Cloudflare AI Gateway.
///
/// The configured host must carry `/v1/<account>/<gateway>[/<provider>]`; only the
/// `openai` provider is supported.
pub(crate) fn gateway_passthrough(host: &str, api_path: &str) -> Result<(String, String)> {
    let invalid = |details: String| {
        Error::configuration_with_context(
            "Cloudflare AI Gateway API Host is not valid",
            ErrorContext::new()
                .with_field_path("access.host")
                .with_details(details)
                .with_source("access_resolver"),
        )
    };

    let parsed = Url::parse(host).map_err(|e| invalid(e.to_string()))?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if !(3..=4).contains(&segments.len()) || segments[0] != "v1" {
        return Err(invalid(format!(
            "expected /v1/<account>/<gateway>/<provider>, got {} path segment(s)",
            segments.len()
        )));
    }

    let account = segments[1];
    let gateway = segments[2];
    let provider = segments.get(3).copied().unwrap_or("openai");
    if provider != "openai" {
        return Err(Error::configuration_with_context(
            "Cloudflare AI Gateway only supports OpenAI as a provider",
            ErrorContext::new()
                .with_field_path("access.host")
                .with_details(format!("provider segment: {}", provider))
                .with_source("access_resolver"),
        ));
    }

    let rest = api_path.strip_prefix("/v1").unwrap_or(api_path);
    Ok((
        format!("https://{}", CLOUDFLARE_GATEWAY_HOST),
        format!("/v1/{}/{}/{}{}", account, gateway, provider, rest),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixup_adds_scheme_and_trims_slash() {
        assert_eq!(
            fixup_host("my.host.test/", "/v1/models"),
            "https://my.host.test"
        );
        assert_eq!(
            fixup_host("http://localhost:1234", "/v1/models"),
            "http://localhost:1234"
        );
        // no leading slash on the path keeps the trailing one
        assert_eq!(fixup_host("https://h.test/", "v1"), "https://h.test/");
    }

    #[test]
    fn test_fixup_is_idempotent() {
        assert_eq!(fixup_host("  ", "/v1/models"), "");
        for raw in ["a.test/", "https://b.test", "http://c.test:8080//", ""] {
            let once = fixup_host(raw, "/v1/chat/completions");
            assert_eq!(fixup_host(&once, "/v1/chat/completions"), once);
        }
    }

    #[test]
    fn test_proxy_rewrites_default_host() {
        let out = apply_proxy(
            OPENAI_DEFAULT_HOST.to_string(),
            Some(("hk".into(), KeyOrigin::Environment)),
        );
        assert_eq!(out.host, "https://oai.hconeai.com");
        assert_eq!(out.proxy_key.as_deref(), Some("hk"));
    }

    #[test]
    fn test_proxy_keeps_explicit_proxy_host() {
        let out = apply_proxy(
            "https://oai.hconeai.com".into(),
            Some(("hk".into(), KeyOrigin::Caller)),
        );
        assert_eq!(out.host, "https://oai.hconeai.com");
        assert_eq!(out.proxy_key.as_deref(), Some("hk"));
    }

    #[test]
    fn test_proxy_key_dropped_for_custom_host() {
        for origin in [KeyOrigin::Caller, KeyOrigin::Environment] {
            let out = apply_proxy("http://localhost:8080".into(), Some(("hk".into(), origin)));
            assert_eq!(out.host, "http://localhost:8080");
            assert_eq!(out.proxy_key, None);
        }
    }

    #[test]
    fn test_gateway_with_provider_segment() {
        let (host, path) = gateway_passthrough(
            "https://gateway.ai.cloudflare.com/v1/acct1/gw1/openai",
            "/v1/chat/completions",
        )
        .unwrap();
        assert_eq!(host, "https://gateway.ai.cloudflare.com");
        assert_eq!(path, "/v1/acct1/gw1/openai/chat/completions");
    }

    #[test]
    fn test_gateway_defaults_provider_to_openai() {
        let (_, path) = gateway_passthrough(
            "https://gateway.ai.cloudflare.com/v1/acct1/gw1/",
            "/v1/models",
        )
        .unwrap();
        assert_eq!(path, "/v1/acct1/gw1/openai/models");
    }

    #[test]
    fn test_gateway_rejects_bad_shapes() {
        for host in [
            "https://gateway.ai.cloudflare.com/v1/acct1",
            "https://gateway.ai.cloudflare.com/v1/a/b/openai/extra",
            "https://gateway.ai.cloudflare.com/v2/a/b",
        ] {
            assert!(
                matches!(
                    gateway_passthrough(host, "/v1/models"),
                    Err(Error::Configuration { .. })
                ),
                "{} should be rejected",
                host
            );
        }
        assert!(matches!(
            gateway_passthrough(
                "https://gateway.ai.cloudflare.com/v1/a/b/anthropic",
                "/v1/models"
            ),
            Err(Error::Configuration { .. })
        ));
    }
}
