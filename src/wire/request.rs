//! Request body builders. Pure functions from canonical types to provider JSON.

use crate::types::{ChatHistoryEntry, ChatModel, FunctionSpec, ImageRequest};
use crate::types::{ImageModel, ImageQuality, ImageSize, ImageStyle};
use serde::Serialize;

pub const MODERATION_MODEL: &str = "text-moderation-latest";

/// `function_call` selector: let the model decide, or force one function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FunctionCallMode {
    Auto(&'static str),
    Named { name: String },
}

impl FunctionCallMode {
    pub fn auto() -> Self {
        FunctionCallMode::Auto("auto")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionBody<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatHistoryEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<&'a [FunctionSpec]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCallMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    pub stream: bool,
}

/// Build a single-choice, non-streaming chat completion body.
///
/// `functions` and `function_call` are only present when functions were supplied.
pub fn chat_completion_body<'a>(
    model: &'a ChatModel,
    history: &'a [ChatHistoryEntry],
    functions: Option<&'a [FunctionSpec]>,
    force_function_name: Option<&str>,
) -> ChatCompletionBody<'a> {
    let function_call = functions.map(|_| match force_function_name {
        Some(name) => FunctionCallMode::Named {
            name: name.to_string(),
        },
        None => FunctionCallMode::auto(),
    });
    ChatCompletionBody {
        model: &model.id,
        messages: history,
        functions,
        function_call,
        temperature: model.temperature,
        max_tokens: model.max_tokens,
        n: Some(1),
        stream: false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    Url,
    B64Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationBody<'a> {
    pub prompt: &'a str,
    pub model: ImageModel,
    pub n: u32,
    pub quality: ImageQuality,
    pub response_format: ImageResponseFormat,
    pub size: ImageSize,
    pub style: ImageStyle,
    pub user: &'a str,
}

pub fn image_generation_body<'a>(request: &'a ImageRequest, user: &'a str) -> ImageGenerationBody<'a> {
    ImageGenerationBody {
        prompt: &request.prompt,
        model: request.model,
        n: request.count,
        quality: request.quality,
        response_format: if request.return_as_url {
            ImageResponseFormat::Url
        } else {
            ImageResponseFormat::B64Json
        },
        size: request.size,
        style: request.style,
        user,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModerationBody<'a> {
    pub input: &'a str,
    pub model: &'static str,
}

pub fn moderation_body(input: &str) -> ModerationBody<'_> {
    ModerationBody {
        input,
        model: MODERATION_MODEL,
    }
}
