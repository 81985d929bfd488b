//! Transport seam: one JSON request/response exchange with a provider.
//!
//! Orchestrators only ever see [`Transport`]; [`HttpTransport`] is the reqwest-backed
//! implementation, tests substitute recording stubs.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// HTTP method used by the adapter. Only GET and POST are ever issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable transport failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The connection was reset, typically because the caller went away.
    ConnectionReset,
    Timeout,
    /// Non-2xx response from the provider.
    Status,
    /// The body was not valid JSON.
    InvalidJson,
    Other,
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::ConnectionReset => "ECONNRESET",
            TransportErrorKind::Timeout => "ETIMEDOUT",
            TransportErrorKind::Status => "HTTP_STATUS",
            TransportErrorKind::InvalidJson => "INVALID_JSON",
            TransportErrorKind::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("[{}]{} {message}", .kind.as_str(), .status.map(|s| format!(" HTTP {}", s)).unwrap_or_default())]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Status,
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn is_connection_reset(&self) -> bool {
        self.kind == TransportErrorKind::ConnectionReset
    }
}

/// Performs a single request and returns the parsed JSON body.
///
/// Implementations must fail on network errors, non-2xx statuses and bodies that
/// are not JSON.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError>;
}
