//! Moderation response, passed through from the provider.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResponse {
    pub id: String,
    pub model: String,
    pub results: Vec<ModerationResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub flagged: bool,
    /// Category name (e.g. `hate/threatening`) to flag.
    #[serde(default)]
    pub categories: BTreeMap<String, bool>,
    #[serde(default)]
    pub category_scores: BTreeMap<String, f64>,
}

impl ModerationResponse {
    pub fn flagged(&self) -> bool {
        self.results.iter().any(|r| r.flagged)
    }

    /// Names of all flagged categories across results, sorted and de-duplicated.
    pub fn flagged_categories(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .results
            .iter()
            .flat_map(|r| r.categories.iter().filter(|(_, v)| **v).map(|(k, _)| k.clone()))
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

/// Outcome of the optional pre-chat moderation gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ModerationVerdict {
    /// Moderation disabled, or nothing to check.
    Skipped,
    Passed,
    Flagged { categories: Vec<String> },
}
