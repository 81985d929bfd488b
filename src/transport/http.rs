use super::{HttpMethod, Transport, TransportError, TransportErrorKind};
use async_trait::async_trait;
use reqwest::Proxy;
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::debug;

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport with env-overridable defaults.
    ///
    /// - `AI_HTTP_TIMEOUT_SECS` (default 30)
    /// - `AI_PROXY_URL` (optional outbound proxy)
    pub fn from_env() -> Result<Self, TransportError> {
        let timeout_secs = env::var("AI_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(timeout_secs));

        if let Ok(proxy_url) = env::var("AI_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::new(TransportErrorKind::Other, e.to_string()))?;
        Ok(Self { client })
    }

    fn classify(err: &reqwest::Error) -> TransportErrorKind {
        if is_connection_reset(err) {
            TransportErrorKind::ConnectionReset
        } else if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_decode() {
            TransportErrorKind::InvalidJson
        } else {
            TransportErrorKind::Other
        }
    }
}

fn is_connection_reset(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionReset {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

/// Pull a human message out of an OpenAI-style error body, falling back to the raw text.
fn upstream_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        debug!(%method, url, "outbound provider request");

        let mut req = match method {
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Get => self.client.get(url),
        };
        for (k, v) in headers {
            req = req.header(k, v);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| TransportError::new(Self::classify(&e), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let reason = status.canonical_reason().unwrap_or("error");
            return Err(TransportError::status(
                status.as_u16(),
                format!("{} {}: {}", status.as_u16(), reason, upstream_error_message(&text)),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(Self::classify(&e), e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| {
            TransportError::new(
                TransportErrorKind::InvalidJson,
                format!("response from {} is not valid JSON: {}", url, e),
            )
        })
    }
}
