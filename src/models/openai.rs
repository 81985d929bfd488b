//! OpenAI catalog, shared by the public API and Azure deployments.

use crate::types::{ModelDescriptor, ModelInterface};
use crate::wire::response::{AzureDeployment, WireModel};
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;

struct KnownModel {
    label: &'static str,
    description: &'static str,
    context_window: u32,
    max_completion_tokens: Option<u32>,
    interfaces: &'static [ModelInterface],
}

const CHAT_FN: &[ModelInterface] = &[ModelInterface::Chat, ModelInterface::FunctionCalling];
const CHAT_FN_VISION: &[ModelInterface] = &[
    ModelInterface::Chat,
    ModelInterface::FunctionCalling,
    ModelInterface::Vision,
];

static CATALOG: Lazy<HashMap<&'static str, KnownModel>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "gpt-4-1106-preview",
        KnownModel {
            label: "GPT-4 Turbo",
            description: "GPT-4 Turbo preview with a 128k context window",
            context_window: 128_000,
            max_completion_tokens: Some(4096),
            interfaces: CHAT_FN,
        },
    );
    m.insert(
        "gpt-4-vision-preview",
        KnownModel {
            label: "GPT-4 Turbo Vision",
            description: "GPT-4 Turbo with image understanding",
            context_window: 128_000,
            max_completion_tokens: Some(4096),
            interfaces: CHAT_FN_VISION,
        },
    );
    m.insert(
        "gpt-4",
        KnownModel {
            label: "GPT-4",
            description: "Latest GPT-4 snapshot",
            context_window: 8192,
            max_completion_tokens: None,
            interfaces: CHAT_FN,
        },
    );
    m.insert(
        "gpt-4-0613",
        KnownModel {
            label: "GPT-4 (0613)",
            description: "GPT-4 snapshot with function calling",
            context_window: 8192,
            max_completion_tokens: None,
            interfaces: CHAT_FN,
        },
    );
    m.insert(
        "gpt-4-0314",
        KnownModel {
            label: "GPT-4 (0314)",
            description: "Legacy GPT-4 snapshot",
            context_window: 8192,
            max_completion_tokens: None,
            interfaces: &[ModelInterface::Chat],
        },
    );
    m.insert(
        "gpt-4-32k",
        KnownModel {
            label: "GPT-4 32k",
            description: "GPT-4 with an extended context window",
            context_window: 32_768,
            max_completion_tokens: None,
            interfaces: CHAT_FN,
        },
    );
    m.insert(
        "gpt-3.5-turbo",
        KnownModel {
            label: "GPT-3.5 Turbo",
            description: "Fast and inexpensive chat model",
            context_window: 4097,
            max_completion_tokens: None,
            interfaces: CHAT_FN,
        },
    );
    m.insert(
        "gpt-3.5-turbo-16k",
        KnownModel {
            label: "GPT-3.5 Turbo 16k",
            description: "GPT-3.5 Turbo with a 16k context window",
            context_window: 16_385,
            max_completion_tokens: None,
            interfaces: CHAT_FN,
        },
    );
    m.insert(
        "gpt-3.5-turbo-1106",
        KnownModel {
            label: "GPT-3.5 Turbo (1106)",
            description: "GPT-3.5 Turbo snapshot with improved function calling",
            context_window: 16_385,
            max_completion_tokens: Some(4096),
            interfaces: CHAT_FN,
        },
    );
    // Azure base model names use "35" without the dot.
    m.insert(
        "gpt-35-turbo",
        KnownModel {
            label: "GPT-3.5 Turbo",
            description: "Fast and inexpensive chat model",
            context_window: 4097,
            max_completion_tokens: None,
            interfaces: CHAT_FN,
        },
    );
    m.insert(
        "gpt-35-turbo-16k",
        KnownModel {
            label: "GPT-3.5 Turbo 16k",
            description: "GPT-3.5 Turbo with a 16k context window",
            context_window: 16_385,
            max_completion_tokens: None,
            interfaces: CHAT_FN,
        },
    );
    m
});

/// Catalog lookup for `model_id`; unknown ids keep their raw id as label.
fn describe(model_id: &str) -> ModelDescriptor {
    match CATALOG.get(model_id) {
        Some(known) => {
            let mut d = ModelDescriptor::new(model_id, known.label);
            d.description = known.description.to_string();
            d.context_window = Some(known.context_window);
            d.max_completion_tokens = known.max_completion_tokens;
            d.interfaces = known.interfaces.to_vec();
            d
        }
        None => {
            let mut d = ModelDescriptor::new(model_id, model_id);
            d.description = "Unknown OpenAI model".to_string();
            d
        }
    }
}

/// Only chat-capable GPT models are listed.
pub fn is_listed(model_id: &str) -> bool {
    model_id.contains("gpt") && !model_id.contains("-instruct")
}

fn prefix5(id: &str) -> &str {
    match id.char_indices().nth(5) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}

/// Newest family first (by the five-character prefix), then shorter ids within a family.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (pa, pb) = (prefix5(a), prefix5(b));
    if pa == pb {
        let (sa, sb) = (a.split('-').count(), b.split('-').count());
        sa.cmp(&sb).then_with(|| a.cmp(b))
    } else {
        pb.cmp(pa)
    }
}

pub fn map_model(model: &WireModel) -> ModelDescriptor {
    let mut d = describe(&model.id);
    d.created = model.created;
    d
}

/// A deployment is addressed by its own name, labeled with the underlying model.
pub fn map_deployment(deployment: &AzureDeployment) -> ModelDescriptor {
    let base = describe(&deployment.model);
    ModelDescriptor {
        id: deployment.id.clone(),
        label: format!("{} ({})", base.label, deployment.id),
        created: Some(deployment.created_at),
        updated: Some(deployment.updated_at),
        ..base
    }
}
