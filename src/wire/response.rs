//! Response shapes accepted from providers.
//!
//! Only the fields the normalizers read are declared; everything else is ignored.

use crate::types::MessageRole;
use serde::Deserialize;
use serde_json::{Map, Value};

/// `GET /v1/models` in the OpenAI form. Some servers omit `data` entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub data: Option<Vec<WireModel>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireModel {
    pub id: String,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub owned_by: Option<String>,
    /// Provider-specific extras (OpenRouter pricing, context length, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created: None,
            owned_by: None,
            extra: Map::new(),
        }
    }
}

/// `GET /openai/deployments` on Azure.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureDeploymentList {
    pub data: Vec<AzureDeployment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AzureDeployment {
    /// Underlying base model, e.g. `gpt-35-turbo`.
    pub model: String,
    pub owner: String,
    /// Deployment name, used in request paths.
    pub id: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub object: String,
}

/// Together AI answers `/v1/models` with a bare array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TogetherAiModel {
    pub id: String,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(rename = "type", default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub context_length: Option<u32>,
}

/// Fields of an OpenRouter model record carried in [`WireModel::extra`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenRouterModelInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub context_length: Option<u32>,
    #[serde(default)]
    pub pricing: Option<OpenRouterPricing>,
    #[serde(default)]
    pub top_provider: Option<OpenRouterTopProvider>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenRouterPricing {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub completion: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenRouterTopProvider {
    #[serde(default)]
    pub max_completion_tokens: Option<u32>,
}

/// Non-streaming chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatChoiceMessage,
    /// Left as text: the accepted set depends on which result variant is built.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub role: MessageRole,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub function_call: Option<WireFunctionCall>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireFunctionCall {
    #[serde(default)]
    pub name: Option<String>,
    /// JSON-encoded arguments object.
    #[serde(default)]
    pub arguments: Option<String>,
}

/// `POST /v1/images/generations`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    pub created: i64,
    pub data: Vec<WireImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}
