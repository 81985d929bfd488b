//! Chat history and the normalized chat result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Assistant,
    System,
    User,
}

/// One entry of the conversation, sent verbatim and in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

impl ChatHistoryEntry {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: text.into(),
        }
    }
}

/// Model selection plus optional sampling settings for a chat call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatModel {
    /// Model id, or the deployment name for Azure.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }
}

/// Why a plain message completion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFinishReason {
    Stop,
    Length,
}

/// Result of a single chat completion: either a function call or a message, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatGenerateOutput {
    #[serde(rename_all = "camelCase")]
    FunctionCall {
        function_name: String,
        function_arguments: Map<String, Value>,
    },
    #[serde(rename_all = "camelCase")]
    Message {
        role: MessageRole,
        content: String,
        finish_reason: Option<MessageFinishReason>,
    },
}

impl ChatGenerateOutput {
    pub fn content(&self) -> Option<&str> {
        match self {
            ChatGenerateOutput::Message { content, .. } => Some(content),
            ChatGenerateOutput::FunctionCall { .. } => None,
        }
    }

    pub fn is_function_call(&self) -> bool {
        matches!(self, ChatGenerateOutput::FunctionCall { .. })
    }
}
