//! Together AI model records.

use crate::types::ModelDescriptor;
use crate::wire::response::TogetherAiModel;

/// Keep chat models only, in the order they were listed.
pub fn map_models(models: &[TogetherAiModel]) -> Vec<ModelDescriptor> {
    models
        .iter()
        .filter(|m| m.model_type.as_deref() == Some("chat"))
        .map(|m| {
            let mut d = ModelDescriptor::new(
                m.id.clone(),
                m.display_name.clone().unwrap_or_else(|| m.id.clone()),
            );
            d.created = m.created;
            d.context_window = m.context_length;
            if let Some(org) = &m.organization {
                d.description = format!("{} model hosted on Together AI", org);
            }
            d
        })
        .collect()
}
