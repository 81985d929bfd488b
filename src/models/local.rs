//! Self-hosted servers: LM Studio, LocalAI and text-generation-webui (oobabooga).

use crate::types::ModelDescriptor;
use crate::wire::response::WireModel;
use once_cell::sync::Lazy;
use regex::Regex;

/// `<name>.<quant>` or `<name>-<quant>`, e.g. `mistral-7b-instruct-v0.1.Q4_K_M`.
static QUANT_SUFFIX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(?P<name>.+?)[.\-](?P<quant>[QqFf]\d+(?:_[0-9A-Za-z]+)*)$").ok());

static WEIGHT_EXTENSION: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)\.(gguf|ggml|ggmlv3|bin|safetensors)$").ok());

/// Placeholders text-generation-webui lists next to the loaded model.
const OOBABOOGA_VIRTUAL_MODELS: &[&str] = &["None", "gpt-3.5-turbo", "text-embedding-ada-002"];

fn strip_extension(name: &str) -> &str {
    match WEIGHT_EXTENSION.as_ref().and_then(|re| re.find(name)) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

/// LM Studio ids are file paths: `<publisher>/<repo>/<file>.gguf`.
pub fn lmstudio_label(id: &str) -> String {
    let file = id.rsplit('/').next().unwrap_or(id);
    let stem = strip_extension(file);
    match QUANT_SUFFIX.as_ref().and_then(|re| re.captures(stem)) {
        Some(caps) => format!("{} ({})", &caps["name"], caps["quant"].to_uppercase()),
        None => stem.to_string(),
    }
}

/// LocalAI ids are config names; render them as words.
pub fn localai_label(id: &str) -> String {
    strip_extension(id)
        .split(|c| c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn map_lmstudio(model: &WireModel) -> ModelDescriptor {
    let mut d = ModelDescriptor::new(model.id.clone(), lmstudio_label(&model.id));
    d.created = model.created;
    d.description = format!("LM Studio model {}", model.id);
    d
}

pub fn map_localai(model: &WireModel) -> ModelDescriptor {
    let mut d = ModelDescriptor::new(model.id.clone(), localai_label(&model.id));
    d.created = model.created;
    d.description = format!("LocalAI model {}", model.id);
    d
}

pub fn map_oobabooga(model: &WireModel) -> ModelDescriptor {
    let mut d = ModelDescriptor::new(model.id.clone(), model.id.clone());
    d.created = model.created;
    d.hidden = OOBABOOGA_VIRTUAL_MODELS.contains(&model.id.as_str())
        || model.id.starts_with("text-embedding");
    d
}
