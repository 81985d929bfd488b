use crate::client::core::CompatClient;
use crate::config::AccessConfig;
use crate::dialect::Dialect;
use crate::normalize::normalize_models;
use crate::transport::HttpMethod;
use crate::types::ModelDescriptor;
use crate::Result;
use tracing::info;

const MODELS_PATH: &str = "/v1/models";
const AZURE_DEPLOYMENTS_PATH: &str = "/openai/deployments?api-version=2023-03-15-preview";

impl CompatClient {
    /// List the models (Azure: deployments) available under `config`.
    pub async fn list_models(&self, config: &AccessConfig) -> Result<Vec<ModelDescriptor>> {
        let path = match config.dialect {
            Dialect::Azure => AZURE_DEPLOYMENTS_PATH,
            _ => MODELS_PATH,
        };
        let raw = self
            .call::<()>(config, None, HttpMethod::Get, path, None)
            .await?;
        let models = normalize_models(config.dialect, raw)?;
        info!(dialect = %config.dialect, count = models.len(), "listed models");
        Ok(models)
    }
}
