use crate::transport::{TransportError, TransportErrorKind};
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "access.host", "choices[0].message.content")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected shape, dialect)
    pub details: Option<String>,
    /// Source of the error (e.g., "access_resolver", "chat_normalizer")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the dialect adapter.
///
/// Configuration and invalid-request errors are raised before any network call.
/// Upstream protocol errors mean the provider answered with a shape we cannot
/// accept. None of them are retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Invalid request: {message}{}", format_context(.context))]
    InvalidRequest {
        message: String,
        context: ErrorContext,
    },

    #[error("Upstream protocol error: {message}{}", format_context(.context))]
    UpstreamProtocol {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Client closed request: {message}")]
    ClientClosedRequest { message: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new invalid-request error with structured context
    pub fn invalid_request_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidRequest {
            message: msg.into(),
            context,
        }
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::upstream_with_context(msg, ErrorContext::new())
    }

    /// Create a new upstream protocol error with structured context
    pub fn upstream_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::UpstreamProtocol {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::InvalidRequest { context, .. }
            | Error::UpstreamProtocol { context, .. } => Some(context),
            _ => None,
        }
    }

    /// HTTP status the outer request handler should report for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Configuration { .. } | Error::InvalidRequest { .. } | Error::BadRequest { .. } => {
                400
            }
            Error::ClientClosedRequest { .. } => 499,
            Error::Transport(e) if e.is_connection_reset() => 499,
            Error::Transport(_) => 400,
            Error::UpstreamProtocol { .. } => 502,
            Error::Serialization(_) => 500,
        }
    }

    /// Stable, machine-readable error class.
    pub fn class(&self) -> &'static str {
        match self {
            Error::Configuration { .. } => "configuration",
            Error::InvalidRequest { .. } => "invalid_request",
            Error::UpstreamProtocol { .. } => "upstream_protocol",
            Error::Transport(e) if e.kind == TransportErrorKind::ConnectionReset => {
                "connection_reset"
            }
            Error::Transport(_) => "transport",
            Error::ClientClosedRequest { .. } => "client_closed_request",
            Error::BadRequest { .. } => "bad_request",
            Error::Serialization(_) => "serialization",
        }
    }

    /// Whether the caller can fix the problem by changing its configuration or input.
    pub fn is_client_correctable(&self) -> bool {
        matches!(
            self,
            Error::Configuration { .. } | Error::InvalidRequest { .. } | Error::BadRequest { .. }
        )
    }
}
