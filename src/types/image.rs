//! Image generation request and result types.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageModel {
    #[serde(rename = "dall-e-2")]
    DallE2,
    /// Premium model; one image per request.
    #[serde(rename = "dall-e-3")]
    DallE3,
}

impl ImageModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::DallE2 => "dall-e-2",
            ImageModel::DallE3 => "dall-e-3",
        }
    }

    pub fn max_count(&self) -> u32 {
        match self {
            ImageModel::DallE2 => 10,
            ImageModel::DallE3 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    #[default]
    Standard,
    Hd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    S256,
    #[serde(rename = "512x512")]
    S512,
    #[default]
    #[serde(rename = "1024x1024")]
    S1024,
    #[serde(rename = "1792x1024")]
    Landscape1792,
    #[serde(rename = "1024x1792")]
    Portrait1792,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Vivid,
    Natural,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub prompt: String,
    pub count: u32,
    pub model: ImageModel,
    #[serde(default)]
    pub quality: ImageQuality,
    #[serde(default = "default_true")]
    pub return_as_url: bool,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub style: ImageStyle,
}

fn default_true() -> bool {
    true
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>, model: ImageModel) -> Self {
        Self {
            prompt: prompt.into(),
            count: 1,
            model,
            quality: ImageQuality::default(),
            return_as_url: true,
            size: ImageSize::default(),
            style: ImageStyle::default(),
        }
    }

    pub fn count(mut self, n: u32) -> Self {
        self.count = n;
        self
    }

    pub fn quality(mut self, q: ImageQuality) -> Self {
        self.quality = q;
        self
    }

    pub fn size(mut self, s: ImageSize) -> Self {
        self.size = s;
        self
    }

    pub fn style(mut self, s: ImageStyle) -> Self {
        self.style = s;
        self
    }

    pub fn inline(mut self) -> Self {
        self.return_as_url = false;
        self
    }

    /// Cross-field checks that must pass before anything is sent.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::invalid_request_with_context(
                "Image count must be at least 1",
                ErrorContext::new()
                    .with_field_path("request.count")
                    .with_source("image_request"),
            ));
        }
        if self.count > self.model.max_count() {
            return Err(Error::invalid_request_with_context(
                format!(
                    "{} supports at most {} image(s) per request",
                    self.model.as_str(),
                    self.model.max_count()
                ),
                ErrorContext::new()
                    .with_field_path("request.count")
                    .with_details(format!("requested: {}", self.count))
                    .with_source("image_request"),
            ));
        }
        Ok(())
    }
}

/// One generated image, always addressable by URL (remote or `data:`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_url: String,
    pub alt_text: String,
}
