use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MODEL: &str = "meta-llama/Llama-4-Scout-17B-16E-Instruct";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Placeholder key shipped with demo deployments; never a real credential.
const DEMO_PLACEHOLDER_KEY: &str = "hf_demo_fallback";

/// Per-deployment generation settings sent with every completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub model: String,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }
}

impl GenerationOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// API key for the inference provider, supplied by the user for the current session.
///
/// The key is redacted from `Debug` output and is never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Accepts a user-supplied key, treating blank input and the demo placeholder as absent
    pub fn new(api_key: impl Into<String>) -> Option<Self> {
        let api_key = api_key.into();
        let trimmed = api_key.trim();
        if trimmed.is_empty() || trimmed == DEMO_PLACEHOLDER_KEY {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", "*".repeat(self.0.len().min(8)))
    }
}
