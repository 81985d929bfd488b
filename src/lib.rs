//! # ai-lib-openai-compat
//!
//! OpenAI 兼容协议方言适配层：一套统一接口访问 Azure、OpenAI、本地推理服务与聚合平台。
//!
//! Dialect adapter for OpenAI-compatible chat providers.
//!
//! ## Overview
//!
//! Many providers speak "almost OpenAI": the same endpoints with different
//! authentication, hosts, path layouts and response quirks. This crate hides
//! those differences behind four operations on [`CompatClient`]:
//!
//! - [`CompatClient::list_models`]: canonical [`ModelDescriptor`]s per dialect
//! - [`CompatClient::chat_generate`]: one non-streaming completion, resolved to
//!   either a function call or a plain message
//! - [`CompatClient::create_images`]: image generation with model limits enforced locally
//! - [`CompatClient::moderate`]: text moderation through the provider endpoint
//!
//! Every call takes its own [`AccessConfig`]; nothing is cached between calls.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_lib_openai_compat::{
//!     AccessConfig, ChatGenerateRequest, ChatHistoryEntry, ChatModel, CompatClient, Dialect,
//! };
//!
//! #[tokio::main]
//! async fn main() -> ai_lib_openai_compat::Result<()> {
//!     let client = CompatClient::builder().build()?;
//!     let config = AccessConfig::new(Dialect::OpenAi).with_api_key("sk-...");
//!
//!     let request = ChatGenerateRequest::new(
//!         ChatModel::new("gpt-4").temperature(0.5),
//!         vec![ChatHistoryEntry::user("Hello!")],
//!     );
//!     let output = client.chat_generate(&config, &request).await?;
//!     println!("{:?}", output.content());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`access`] | Per-dialect URL and header resolution |
//! | [`client`] | Client, builder and the provider operations |
//! | [`config`] | Access configuration, environment fallbacks, client identity |
//! | [`dialect`] | The closed set of supported dialects |
//! | [`models`] | Per-dialect model tables and sort orders |
//! | [`normalize`] | Response normalization into canonical types |
//! | [`transport`] | The HTTP seam and its reqwest implementation |
//! | [`types`] | Canonical request and result types |
//! | [`wire`] | Provider request bodies and response shapes |

pub mod access;
pub mod client;
pub mod config;
pub mod dialect;
pub mod models;
pub mod normalize;
pub mod transport;
pub mod types;
pub mod wire;

pub use client::{ChatGenerateRequest, CompatClient, CompatClientBuilder};
pub use config::{AccessConfig, ClientIdentity, EnvSource, ProcessEnv, StaticEnv};
pub use dialect::Dialect;
pub use transport::{HttpMethod, HttpTransport, Transport, TransportError, TransportErrorKind};
pub use types::{
    ChatGenerateOutput, ChatHistoryEntry, ChatModel, FunctionSpec, GeneratedImage, ImageModel,
    ImageRequest, MessageFinishReason, MessageRole, ModelDescriptor, ModerationResponse,
    ModerationVerdict,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

pub mod error;
pub use error::{Error, ErrorContext};
