//! Chat completion disambiguation: one choice becomes either a function call or a message.

use crate::dialect::Dialect;
use crate::types::{ChatGenerateOutput, MessageFinishReason};
use crate::wire::response::{ChatChoice, ChatCompletionResponse};
use crate::wire::validate;
use crate::{Error, ErrorContext, Result};
use serde_json::{Map, Value};

const FUNCTION_CALL_REASON: &str = "function_call";

fn protocol(message: impl Into<String>, field: &str) -> Error {
    Error::upstream_with_context(
        message,
        ErrorContext::new()
            .with_field_path(field)
            .with_source("chat_normalizer"),
    )
}

/// LocalAI omits `finish_reason` on completed generations; treat that as `stop`.
fn localai_finish_reason_shim(dialect: Dialect, reason: Option<String>) -> Option<String> {
    match (dialect, reason) {
        (Dialect::LocalAi, None) => Some("stop".to_string()),
        (_, reason) => reason,
    }
}

/// Normalize a raw chat completion. `functions_requested` says whether the
/// request carried function definitions.
pub fn normalize_chat(
    dialect: Dialect,
    raw: Value,
    functions_requested: bool,
) -> Result<ChatGenerateOutput> {
    let response: ChatCompletionResponse = validate(raw, "chat completion")?;
    let mut choices = response.choices;
    if choices.len() != 1 {
        return Err(Error::upstream_with_context(
            "Expected exactly one choice in chat completion",
            ErrorContext::new()
                .with_field_path("choices")
                .with_details(format!("received: {}", choices.len()))
                .with_source("chat_normalizer"),
        ));
    }
    let choice = choices.remove(0);
    let finish_reason = localai_finish_reason_shim(dialect, choice.finish_reason.clone());

    if finish_reason.as_deref() == Some(FUNCTION_CALL_REASON) || choice.message.function_call.is_some() {
        function_call(choice, functions_requested)
    } else {
        message(choice, finish_reason)
    }
}

fn function_call(choice: ChatChoice, functions_requested: bool) -> Result<ChatGenerateOutput> {
    if !functions_requested {
        return Err(protocol(
            "Model returned a function call but no functions were requested",
            "choices[0].message.function_call",
        ));
    }
    if choice.message.content.is_some() {
        return Err(protocol(
            "Function call response must not carry message content",
            "choices[0].message.content",
        ));
    }
    let call = choice.message.function_call.unwrap_or_default();
    let name = call
        .name
        .ok_or_else(|| protocol("Function call is missing its name", "choices[0].message.function_call.name"))?;
    let raw_args = call.arguments.ok_or_else(|| {
        protocol(
            "Function call is missing its arguments",
            "choices[0].message.function_call.arguments",
        )
    })?;

    let args: Value = serde_json::from_str(&raw_args).map_err(|e| {
        Error::upstream_with_context(
            "Function call arguments are not valid JSON",
            ErrorContext::new()
                .with_field_path("choices[0].message.function_call.arguments")
                .with_details(e.to_string())
                .with_source("chat_normalizer"),
        )
    })?;
    let function_arguments: Map<String, Value> = match args {
        Value::Object(map) => map,
        _ => {
            return Err(protocol(
                "Function call arguments must be a JSON object",
                "choices[0].message.function_call.arguments",
            ))
        }
    };

    Ok(ChatGenerateOutput::FunctionCall {
        function_name: name,
        function_arguments,
    })
}

fn message(choice: ChatChoice, finish_reason: Option<String>) -> Result<ChatGenerateOutput> {
    let content = choice
        .message
        .content
        .ok_or_else(|| protocol("Chat completion message has no content", "choices[0].message.content"))?;
    let finish_reason = match finish_reason.as_deref() {
        None => None,
        Some("stop") => Some(MessageFinishReason::Stop),
        Some("length") => Some(MessageFinishReason::Length),
        Some(other) => {
            return Err(Error::upstream_with_context(
                "Unsupported finish reason",
                ErrorContext::new()
                    .with_field_path("choices[0].finish_reason")
                    .with_details(format!("received: {}", other))
                    .with_source("chat_normalizer"),
            ))
        }
    };
    Ok(ChatGenerateOutput::Message {
        role: choice.message.role,
        content,
        finish_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;
    use serde_json::json;

    fn completion(message: Value, finish_reason: Value) -> Value {
        json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": message, "finish_reason": finish_reason}]
        })
    }

    #[test]
    fn test_plain_message() {
        let raw = completion(json!({"role": "assistant", "content": "Hello"}), json!("stop"));
        let out = normalize_chat(Dialect::OpenAi, raw, false).unwrap();
        assert_eq!(
            out,
            ChatGenerateOutput::Message {
                role: MessageRole::Assistant,
                content: "Hello".into(),
                finish_reason: Some(MessageFinishReason::Stop),
            }
        );
    }

    #[test]
    fn test_function_call_by_finish_reason() {
        let raw = completion(
            json!({"role": "assistant", "content": null,
                   "function_call": {"name": "f", "arguments": "{\"x\":1}"}}),
            json!("function_call"),
        );
        match normalize_chat(Dialect::OpenAi, raw, true).unwrap() {
            ChatGenerateOutput::FunctionCall {
                function_name,
                function_arguments,
            } => {
                assert_eq!(function_name, "f");
                assert_eq!(function_arguments.get("x"), Some(&json!(1)));
            }
            other => panic!("expected function call, got {:?}", other),
        }
    }

    #[test]
    fn test_function_call_without_finish_reason() {
        let raw = completion(
            json!({"role": "assistant", "function_call": {"name": "f", "arguments": "{}"}}),
            Value::Null,
        );
        assert!(normalize_chat(Dialect::Mistral, raw, true).unwrap().is_function_call());
    }

    #[test]
    fn test_function_call_rejections() {
        let call = |args: &str| {
            completion(
                json!({"role": "assistant", "function_call": {"name": "f", "arguments": args}}),
                json!("function_call"),
            )
        };
        // not requested
        assert!(normalize_chat(Dialect::OpenAi, call("{}"), false).is_err());
        // malformed and non-object arguments
        assert!(normalize_chat(Dialect::OpenAi, call("{x:"), true).is_err());
        assert!(normalize_chat(Dialect::OpenAi, call("[1,2]"), true).is_err());
        // content alongside the call
        let mixed = completion(
            json!({"role": "assistant", "content": "hi",
                   "function_call": {"name": "f", "arguments": "{}"}}),
            json!("function_call"),
        );
        assert!(normalize_chat(Dialect::OpenAi, mixed, true).is_err());
        // finish reason says function_call but nothing is attached
        let bare = completion(json!({"role": "assistant"}), json!("function_call"));
        assert!(normalize_chat(Dialect::OpenAi, bare, true).is_err());
    }

    #[test]
    fn test_choice_count_must_be_one() {
        let none = json!({"choices": []});
        assert!(matches!(
            normalize_chat(Dialect::OpenAi, none, false),
            Err(Error::UpstreamProtocol { .. })
        ));
        let msg = json!({"index": 0, "message": {"role": "assistant", "content": "a"}, "finish_reason": "stop"});
        let two = json!({"choices": [msg.clone(), msg]});
        assert!(normalize_chat(Dialect::OpenAi, two, false).is_err());
    }

    #[test]
    fn test_missing_content_and_bad_reason() {
        let no_content = completion(json!({"role": "assistant"}), json!("stop"));
        assert!(normalize_chat(Dialect::OpenAi, no_content, false).is_err());
        let filtered = completion(json!({"role": "assistant", "content": "x"}), json!("content_filter"));
        let err = normalize_chat(Dialect::OpenAi, filtered, false).unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("choices[0].finish_reason")
        );
    }

    #[test]
    fn test_finish_reason_shim_is_localai_only() {
        let raw = || completion(json!({"role": "assistant", "content": "x"}), Value::Null);
        match normalize_chat(Dialect::LocalAi, raw(), false).unwrap() {
            ChatGenerateOutput::Message { finish_reason, .. } => {
                assert_eq!(finish_reason, Some(MessageFinishReason::Stop))
            }
            other => panic!("unexpected {:?}", other),
        }
        match normalize_chat(Dialect::LmStudio, raw(), false).unwrap() {
            ChatGenerateOutput::Message { finish_reason, .. } => assert_eq!(finish_reason, None),
            other => panic!("unexpected {:?}", other),
        }
    }
}
