use crate::client::core::CompatClient;
use crate::config::AccessConfig;
use crate::normalize::normalize_images;
use crate::transport::HttpMethod;
use crate::types::{GeneratedImage, ImageRequest};
use crate::wire::request::image_generation_body;
use crate::Result;
use tracing::info;

const IMAGE_GENERATIONS_PATH: &str = "/v1/images/generations";

impl CompatClient {
    /// Generate images. Requests the model cannot honor fail before any network call.
    pub async fn create_images(
        &self,
        config: &AccessConfig,
        request: &ImageRequest,
    ) -> Result<Vec<GeneratedImage>> {
        request.validate()?;
        let body = image_generation_body(request, &self.identity.user);
        let raw = self
            .call(
                config,
                Some(request.model.as_str()),
                HttpMethod::Post,
                IMAGE_GENERATIONS_PATH,
                Some(&body),
            )
            .await?;
        let images = normalize_images(request, raw)?;
        info!(
            dialect = %config.dialect,
            model = request.model.as_str(),
            count = images.len(),
            "image generation completed"
        );
        Ok(images)
    }
}
