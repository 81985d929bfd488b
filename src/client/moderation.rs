use crate::client::core::CompatClient;
use crate::config::AccessConfig;
use crate::transport::HttpMethod;
use crate::types::{ChatHistoryEntry, MessageRole, ModerationResponse, ModerationVerdict};
use crate::wire::request::{moderation_body, MODERATION_MODEL};
use crate::wire::validate;
use crate::{Error, Result};
use tracing::{info, warn};

const MODERATIONS_PATH: &str = "/v1/moderations";

/// A moderation reply of the wrong shape is reported as a bad request.
fn moderation_failure(err: Error) -> Error {
    match err {
        Error::UpstreamProtocol { message, .. } => Error::BadRequest { message },
        other => other,
    }
}

impl CompatClient {
    /// Classify `text` with the provider's moderation endpoint.
    pub async fn moderate(&self, config: &AccessConfig, text: &str) -> Result<ModerationResponse> {
        let body = moderation_body(text);
        let raw = self
            .call(
                config,
                Some(MODERATION_MODEL),
                HttpMethod::Post,
                MODERATIONS_PATH,
                Some(&body),
            )
            .await?;
        let response: ModerationResponse =
            validate(raw, "moderation response").map_err(moderation_failure)?;
        info!(
            dialect = %config.dialect,
            flagged = response.flagged(),
            "moderation completed"
        );
        Ok(response)
    }

    /// Moderate the latest user message when `config` enables moderation.
    pub async fn check_moderation(
        &self,
        config: &AccessConfig,
        history: &[ChatHistoryEntry],
    ) -> Result<ModerationVerdict> {
        if !config.moderation_enabled {
            return Ok(ModerationVerdict::Skipped);
        }
        let last_user = history
            .iter()
            .rev()
            .find(|entry| entry.role == MessageRole::User);
        let Some(entry) = last_user else {
            return Ok(ModerationVerdict::Skipped);
        };

        let response = self.moderate(config, &entry.content).await?;
        if response.flagged() {
            let categories = response.flagged_categories();
            warn!(dialect = %config.dialect, ?categories, "user message flagged by moderation");
            Ok(ModerationVerdict::Flagged { categories })
        } else {
            Ok(ModerationVerdict::Passed)
        }
    }
}
