//! Model listing post-processing.

use crate::dialect::Dialect;
use crate::models::{local, mistral, openai, openrouter, togetherai};
use crate::types::ModelDescriptor;
use crate::wire::response::{AzureDeploymentList, ModelList, TogetherAiModel, WireModel};
use crate::wire::validate;
use crate::Result;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Drop repeated ids, keeping the first occurrence. Returns the number removed.
pub fn dedupe_by_id(models: Vec<WireModel>) -> (Vec<WireModel>, usize) {
    let before = models.len();
    let mut seen = HashSet::new();
    let kept: Vec<WireModel> = models
        .into_iter()
        .filter(|m| seen.insert(m.id.clone()))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Shared path for `{ data: [...] }` listings: extract, de-duplicate, sort by id.
fn generic_listing(dialect: Dialect, raw: Value) -> Result<Vec<WireModel>> {
    let list: ModelList = validate(raw, "model list")?;
    let (mut models, removed) = dedupe_by_id(list.data.unwrap_or_default());
    if removed > 0 {
        warn!(dialect = %dialect, removed, "provider listed duplicate model ids");
    }
    models.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(models)
}

/// Turn a raw listing response into descriptors for `dialect`.
pub fn normalize_models(dialect: Dialect, raw: Value) -> Result<Vec<ModelDescriptor>> {
    let descriptors = match dialect {
        Dialect::Azure => {
            let list: AzureDeploymentList = validate(raw, "Azure deployment list")?;
            list.data
                .iter()
                .filter(|d| d.model.contains("gpt"))
                .map(openai::map_deployment)
                .collect()
        }
        Dialect::TogetherAi => {
            let list: Vec<TogetherAiModel> = validate(raw, "Together AI model list")?;
            togetherai::map_models(&list)
        }
        Dialect::LmStudio => generic_listing(dialect, raw)?
            .iter()
            .map(local::map_lmstudio)
            .collect(),
        Dialect::LocalAi => generic_listing(dialect, raw)?
            .iter()
            .map(local::map_localai)
            .collect(),
        Dialect::Mistral => {
            let mut out: Vec<ModelDescriptor> = generic_listing(dialect, raw)?
                .iter()
                .map(mistral::map_model)
                .collect();
            out.sort_by(mistral::compare);
            out
        }
        Dialect::Oobabooga => generic_listing(dialect, raw)?
            .iter()
            .map(local::map_oobabooga)
            .filter(|d| !d.hidden)
            .collect(),
        Dialect::OpenAi => {
            let mut models = generic_listing(dialect, raw)?;
            models.retain(|m| openai::is_listed(&m.id));
            models.sort_by(|a, b| openai::compare(&a.id, &b.id));
            models.iter().map(openai::map_model).collect()
        }
        Dialect::OpenRouter => {
            let mut models = generic_listing(dialect, raw)?;
            models.sort_by(openrouter::compare);
            models.iter().map(openrouter::map_model).collect()
        }
    };
    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    fn ids(models: &[ModelDescriptor]) -> Vec<&str> {
        models.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let a = WireModel {
            created: Some(1),
            ..WireModel::new("a")
        };
        let a_again = WireModel {
            created: Some(2),
            ..WireModel::new("a")
        };
        let (kept, removed) = dedupe_by_id(vec![a, WireModel::new("b"), a_again]);
        assert_eq!(removed, 1);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].created, Some(1));
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let ids_in = ["c", "a", "c", "b", "a", "c"];
        let models: Vec<WireModel> = ids_in.iter().map(|id| WireModel::new(*id)).collect();
        let (once, removed) = dedupe_by_id(models);
        assert_eq!(removed, ids_in.len() - once.len());
        assert_eq!(removed, 3);
        let (twice, removed_again) = dedupe_by_id(once.clone());
        assert_eq!(twice, once);
        assert_eq!(removed_again, 0);
    }

    #[test]
    fn test_openai_filter_and_order() {
        let raw = json!({"data": [
            {"id": "gpt-3.5-turbo"}, {"id": "gpt-4-0314"}, {"id": "dall-e-3"},
            {"id": "gpt-4"}, {"id": "gpt-3.5-turbo-instruct"}, {"id": "gpt-4"}
        ]});
        let models = normalize_models(Dialect::OpenAi, raw).unwrap();
        assert_eq!(ids(&models), vec!["gpt-4", "gpt-4-0314", "gpt-3.5-turbo"]);
        assert_eq!(models[0].label, "GPT-4");
    }

    #[test]
    fn test_missing_data_is_empty() {
        let models = normalize_models(Dialect::LocalAi, json!({"object": "list"})).unwrap();
        assert!(models.is_empty());
    }

    #[test]
    fn test_generic_listing_sorted_ascending() {
        let raw = json!({"data": [{"id": "zeta"}, {"id": "alpha"}, {"id": "mid"}]});
        let models = normalize_models(Dialect::LmStudio, raw).unwrap();
        assert_eq!(ids(&models), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_oobabooga_drops_virtual() {
        let raw = json!({"data": [{"id": "None"}, {"id": "llama-13b"}, {"id": "gpt-3.5-turbo"}]});
        let models = normalize_models(Dialect::Oobabooga, raw).unwrap();
        assert_eq!(ids(&models), vec!["llama-13b"]);
    }

    #[test]
    fn test_azure_deployments() {
        let deployment = |model: &str, id: &str| {
            json!({"model": model, "owner": "organization-owner", "id": id,
                   "status": "succeeded", "created_at": 1, "updated_at": 2, "object": "deployment"})
        };
        let raw = json!({"data": [
            deployment("gpt-35-turbo", "chat"),
            deployment("text-embedding-ada-002", "embed"),
            deployment("gpt-4", "big")
        ]});
        let models = normalize_models(Dialect::Azure, raw).unwrap();
        assert_eq!(ids(&models), vec!["chat", "big"]);
        assert_eq!(models[1].label, "GPT-4 (big)");
    }

    #[test]
    fn test_azure_shape_mismatch() {
        let raw = json!({"data": [{"model": "gpt-4", "id": "x"}]});
        let err = normalize_models(Dialect::Azure, raw).unwrap_err();
        assert!(matches!(err, Error::UpstreamProtocol { .. }));
    }

    #[test]
    fn test_togetherai_bare_array() {
        let raw = json!([
            {"id": "b/chat", "type": "chat"},
            {"id": "a/image", "type": "image"}
        ]);
        let models = normalize_models(Dialect::TogetherAi, raw).unwrap();
        assert_eq!(ids(&models), vec!["b/chat"]);
    }
}
