use crate::client::core::CompatClient;
use crate::config::AccessConfig;
use crate::normalize::normalize_chat;
use crate::transport::HttpMethod;
use crate::types::{ChatGenerateOutput, ChatHistoryEntry, ChatModel, FunctionSpec};
use crate::wire::request::chat_completion_body;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// One chat generation: model, ordered history and optional functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatGenerateRequest {
    pub model: ChatModel,
    pub history: Vec<ChatHistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionSpec>>,
    /// Forces the model to call this function. Ignored without `functions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_function_name: Option<String>,
}

impl ChatGenerateRequest {
    pub fn new(model: ChatModel, history: Vec<ChatHistoryEntry>) -> Self {
        Self {
            model,
            history,
            functions: None,
            force_function_name: None,
        }
    }

    pub fn functions(mut self, functions: Vec<FunctionSpec>) -> Self {
        self.functions = Some(functions);
        self
    }

    pub fn force_function(mut self, name: impl Into<String>) -> Self {
        self.force_function_name = Some(name.into());
        self
    }
}

impl CompatClient {
    /// Run a single-choice, non-streaming chat completion.
    pub async fn chat_generate(
        &self,
        config: &AccessConfig,
        request: &ChatGenerateRequest,
    ) -> Result<ChatGenerateOutput> {
        let body = chat_completion_body(
            &request.model,
            &request.history,
            request.functions.as_deref(),
            request.force_function_name.as_deref(),
        );
        let raw = self
            .call(
                config,
                Some(&request.model.id),
                HttpMethod::Post,
                CHAT_COMPLETIONS_PATH,
                Some(&body),
            )
            .await?;
        let output = normalize_chat(config.dialect, raw, request.functions.is_some())?;
        info!(
            dialect = %config.dialect,
            model = %request.model.id,
            function_call = output.is_function_call(),
            "chat generation completed"
        );
        Ok(output)
    }
}
