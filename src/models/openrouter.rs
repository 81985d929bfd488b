//! OpenRouter aggregated catalog.

use crate::types::{ModelDescriptor, ModelInterface};
use crate::wire::response::{OpenRouterModelInfo, WireModel};
use std::cmp::Ordering;

/// Vendors listed first, in this order; the rest follow alphabetically.
const VENDOR_ORDER: &[&str] = &[
    "openai",
    "anthropic",
    "google",
    "meta-llama",
    "mistralai",
];

fn vendor(id: &str) -> &str {
    id.split_once('/').map(|(v, _)| v).unwrap_or("")
}

fn vendor_rank(id: &str) -> usize {
    let v = vendor(id);
    VENDOR_ORDER
        .iter()
        .position(|known| *known == v)
        .unwrap_or(VENDOR_ORDER.len())
}

pub fn compare(a: &WireModel, b: &WireModel) -> Ordering {
    vendor_rank(&a.id)
        .cmp(&vendor_rank(&b.id))
        .then_with(|| vendor(&a.id).cmp(vendor(&b.id)))
        .then_with(|| a.id.cmp(&b.id))
}

fn info(model: &WireModel) -> OpenRouterModelInfo {
    // extras are best-effort metadata; a malformed field only loses the label
    serde_json::from_value(serde_json::Value::Object(model.extra.clone())).unwrap_or_default()
}

pub fn map_model(model: &WireModel) -> ModelDescriptor {
    let info = info(model);
    let mut d = ModelDescriptor::new(
        model.id.clone(),
        info.name.unwrap_or_else(|| model.id.clone()),
    );
    d.created = model.created;
    d.description = info.description.unwrap_or_default();
    d.context_window = info.context_length;
    d.max_completion_tokens = info.top_provider.and_then(|p| p.max_completion_tokens);
    if vendor(&model.id) == "openai" {
        d.interfaces.push(ModelInterface::FunctionCalling);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(v: serde_json::Value) -> WireModel {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_vendor_ordering() {
        let mut models = vec![
            WireModel::new("zephyr/z-7b"),
            WireModel::new("anthropic/claude-2"),
            WireModel::new("alpha/a-1"),
            WireModel::new("openai/gpt-4"),
            WireModel::new("openai/gpt-3.5-turbo"),
        ];
        models.sort_by(compare);
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "openai/gpt-3.5-turbo",
                "openai/gpt-4",
                "anthropic/claude-2",
                "alpha/a-1",
                "zephyr/z-7b"
            ]
        );
    }

    #[test]
    fn test_map_reads_extras() {
        let d = map_model(&wire(serde_json::json!({
            "id": "openai/gpt-4",
            "name": "OpenAI: GPT-4",
            "description": "GPT-4 via OpenRouter",
            "context_length": 8191,
            "pricing": {"prompt": "0.00003", "completion": "0.00006"},
            "top_provider": {"max_completion_tokens": 4096}
        })));
        assert_eq!(d.label, "OpenAI: GPT-4");
        assert_eq!(d.context_window, Some(8191));
        assert_eq!(d.max_completion_tokens, Some(4096));
        assert!(d.supports(ModelInterface::FunctionCalling));
    }

    #[test]
    fn test_map_without_extras() {
        let d = map_model(&WireModel::new("meta-llama/llama-2-70b-chat"));
        assert_eq!(d.label, "meta-llama/llama-2-70b-chat");
        assert_eq!(d.context_window, None);
    }
}
