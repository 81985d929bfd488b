//! Provider wire contracts: request bodies we send and response shapes we accept.
//!
//! Every response goes through [`validate`] so a shape mismatch is reported the
//! same way everywhere, with the path of the first offending field.

pub mod request;
pub mod response;

use crate::{Error, ErrorContext, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize `value` into the wire shape `T`, failing with an upstream protocol
/// error that names the shape and the first mismatching path.
pub fn validate<T: DeserializeOwned>(value: Value, shape: &str) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        Error::upstream_with_context(
            format!("{} does not match the expected shape", shape),
            ErrorContext::new()
                .with_field_path(path)
                .with_details(e.inner().to_string())
                .with_source("shape_validator"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::response::ChatCompletionResponse;

    #[test]
    fn test_validate_reports_first_mismatch_path() {
        let raw = serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": 42}}]
        });
        let err = validate::<ChatCompletionResponse>(raw, "chat completion").unwrap_err();
        match err {
            Error::UpstreamProtocol { message, context } => {
                assert!(message.starts_with("chat completion"));
                assert_eq!(
                    context.field_path.as_deref(),
                    Some("choices[0].message.content")
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
