//! Canonical model description returned by model listing.

use serde::{Deserialize, Serialize};

/// What a model can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelInterface {
    Chat,
    FunctionCalling,
    Vision,
    Completion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Provider-facing reference: deployment name on Azure, model id elsewhere.
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    #[serde(default)]
    pub interfaces: Vec<ModelInterface>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            created: None,
            updated: None,
            description: String::new(),
            context_window: None,
            max_completion_tokens: None,
            interfaces: vec![ModelInterface::Chat],
            hidden: false,
        }
    }

    pub fn supports(&self, interface: ModelInterface) -> bool {
        self.interfaces.contains(&interface)
    }
}
