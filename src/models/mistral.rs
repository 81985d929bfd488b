//! Mistral platform models.

use crate::types::{ModelDescriptor, ModelInterface};
use crate::wire::response::WireModel;
use std::cmp::Ordering;

/// Family prefixes, strongest first. Unknown families sort after these.
const FAMILY_ORDER: &[&str] = &[
    "mistral-large",
    "mistral-medium",
    "mistral-small",
    "open-mixtral",
    "mistral-tiny",
    "open-mistral",
    "mistral-embed",
];

fn family_rank(id: &str) -> usize {
    FAMILY_ORDER
        .iter()
        .position(|prefix| id.starts_with(prefix))
        .unwrap_or(FAMILY_ORDER.len())
}

fn label_for(id: &str) -> String {
    match id {
        "mistral-large-latest" => "Mistral Large".into(),
        "mistral-medium" | "mistral-medium-latest" => "Mistral Medium".into(),
        "mistral-small" | "mistral-small-latest" => "Mistral Small".into(),
        "mistral-tiny" => "Mistral Tiny".into(),
        "open-mistral-7b" => "Mistral 7B".into(),
        "open-mixtral-8x7b" => "Mixtral 8x7B".into(),
        "mistral-embed" => "Mistral Embed".into(),
        other => other.to_string(),
    }
}

pub fn compare(a: &ModelDescriptor, b: &ModelDescriptor) -> Ordering {
    family_rank(&a.id)
        .cmp(&family_rank(&b.id))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn map_model(model: &WireModel) -> ModelDescriptor {
    let mut d = ModelDescriptor::new(model.id.clone(), label_for(&model.id));
    d.created = model.created;
    d.context_window = Some(32_000);
    if model.id.contains("embed") {
        d.interfaces = Vec::new();
        d.context_window = Some(8192);
    } else if !model.id.contains("tiny") && !model.id.starts_with("open-") {
        d.interfaces.push(ModelInterface::FunctionCalling);
    }
    d
}
