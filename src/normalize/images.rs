//! Image generation result mapping.

use crate::types::{GeneratedImage, ImageRequest};
use crate::wire::response::ImageGenerationResponse;
use crate::wire::validate;
use crate::{Error, ErrorContext, Result};
use serde_json::Value;

const INLINE_PNG_PREFIX: &str = "data:image/png;base64,";

fn protocol(message: &str, index: usize, details: &str) -> Error {
    Error::upstream_with_context(
        message,
        ErrorContext::new()
            .with_field_path(format!("data[{}]", index))
            .with_details(details)
            .with_source("image_normalizer"),
    )
}

/// Map provider images to `{ image_url, alt_text }`, honoring the requested format.
pub fn normalize_images(request: &ImageRequest, raw: Value) -> Result<Vec<GeneratedImage>> {
    let response: ImageGenerationResponse = validate(raw, "image generation")?;

    response
        .data
        .into_iter()
        .enumerate()
        .map(|(i, image)| {
            let image_url = match (request.return_as_url, image.url, image.b64_json) {
                (true, Some(url), None) => url,
                (true, _, Some(_)) => {
                    return Err(protocol(
                        "Received inline image data when a URL was requested",
                        i,
                        "b64_json present",
                    ))
                }
                (false, _, Some(b64)) => format!("{}{}", INLINE_PNG_PREFIX, b64),
                (false, Some(url), None) => url,
                (_, None, None) => {
                    return Err(protocol("Generated image has no URL", i, "url missing"))
                }
            };
            Ok(GeneratedImage {
                image_url,
                alt_text: image
                    .revised_prompt
                    .unwrap_or_else(|| request.prompt.clone()),
            })
        })
        .collect()
}
