//! Dialect registry: the closed set of OpenAI-wire-compatible providers and their
//! static defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const OPENAI_DEFAULT_HOST: &str = "https://api.openai.com";
pub const MISTRAL_DEFAULT_HOST: &str = "https://api.mistral.ai";
pub const OPENROUTER_DEFAULT_HOST: &str = "https://openrouter.ai/api";
pub const TOGETHERAI_DEFAULT_HOST: &str = "https://api.together.xyz";

/// A provider's variant of the OpenAI-compatible wire protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Azure,
    LmStudio,
    LocalAi,
    Mistral,
    Oobabooga,
    #[default]
    OpenAi,
    OpenRouter,
    TogetherAi,
}

/// Environment variables consulted when the caller leaves a field empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvFallbacks {
    pub api_key: &'static str,
    pub host: &'static str,
    pub organization: Option<&'static str>,
    pub proxy_key: Option<&'static str>,
}

impl Dialect {
    pub const ALL: [Dialect; 8] = [
        Dialect::Azure,
        Dialect::LmStudio,
        Dialect::LocalAi,
        Dialect::Mistral,
        Dialect::Oobabooga,
        Dialect::OpenAi,
        Dialect::OpenRouter,
        Dialect::TogetherAi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Azure => "azure",
            Dialect::LmStudio => "lmstudio",
            Dialect::LocalAi => "localai",
            Dialect::Mistral => "mistral",
            Dialect::Oobabooga => "oobabooga",
            Dialect::OpenAi => "openai",
            Dialect::OpenRouter => "openrouter",
            Dialect::TogetherAi => "togetherai",
        }
    }

    /// Host used when neither the caller nor the environment provides one.
    /// Azure has no public default: every tenant has its own endpoint.
    pub fn default_host(&self) -> Option<&'static str> {
        match self {
            Dialect::Azure => None,
            Dialect::LmStudio | Dialect::LocalAi | Dialect::Oobabooga | Dialect::OpenAi => {
                Some(OPENAI_DEFAULT_HOST)
            }
            Dialect::Mistral => Some(MISTRAL_DEFAULT_HOST),
            Dialect::OpenRouter => Some(OPENROUTER_DEFAULT_HOST),
            Dialect::TogetherAi => Some(TOGETHERAI_DEFAULT_HOST),
        }
    }

    pub fn env_fallbacks(&self) -> EnvFallbacks {
        match self {
            Dialect::Azure => EnvFallbacks {
                api_key: "AZURE_OPENAI_API_KEY",
                host: "AZURE_OPENAI_API_ENDPOINT",
                organization: None,
                proxy_key: None,
            },
            Dialect::LmStudio | Dialect::LocalAi | Dialect::Oobabooga | Dialect::OpenAi => {
                EnvFallbacks {
                    api_key: "OPENAI_API_KEY",
                    host: "OPENAI_API_HOST",
                    organization: Some("OPENAI_API_ORG_ID"),
                    proxy_key: Some("HELICONE_API_KEY"),
                }
            }
            Dialect::Mistral => EnvFallbacks {
                api_key: "MISTRAL_API_KEY",
                host: "MISTRAL_API_HOST",
                organization: None,
                proxy_key: None,
            },
            Dialect::OpenRouter => EnvFallbacks {
                api_key: "OPENROUTER_API_KEY",
                host: "OPENROUTER_API_HOST",
                organization: None,
                proxy_key: None,
            },
            Dialect::TogetherAi => EnvFallbacks {
                api_key: "TOGETHERAI_API_KEY",
                host: "TOGETHERAI_API_HOST",
                organization: None,
                proxy_key: None,
            },
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Dialect::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == needle)
            .ok_or_else(|| {
                crate::Error::configuration_with_context(
                    format!("Unknown dialect: {}", s),
                    crate::ErrorContext::new()
                        .with_field_path("access.dialect")
                        .with_details(format!(
                            "expected one of: {}",
                            Dialect::ALL.map(|d| d.as_str()).join(", ")
                        )),
                )
            })
    }
}
