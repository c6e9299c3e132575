use std::time::Duration;

use crate::{
    error::{PlannerError, Result},
    services::chat_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
    types::GenerationOptions,
};

/// Deployment settings for the planner. The API key is deliberately not part of this.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub base_url: String,
    pub options: GenerationOptions,
    pub timeout: Duration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            options: GenerationOptions::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PlannerConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults overlaid with `HF_BASE_URL`, `HF_MODEL`, `HF_MAX_TOKENS`,
    /// `HF_TEMPERATURE` and `HF_TIMEOUT_SECS` when set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup("HF_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("HF_MODEL") {
            config.options.model = model;
        }
        if let Some(max_tokens) = lookup("HF_MAX_TOKENS") {
            config.options.max_tokens = parse_var("HF_MAX_TOKENS", &max_tokens)?;
        }
        if let Some(temperature) = lookup("HF_TEMPERATURE") {
            config.options.temperature = Some(parse_var("HF_TEMPERATURE", &temperature)?);
        }
        if let Some(timeout) = lookup("HF_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_var("HF_TIMEOUT_SECS", &timeout)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.options.max_tokens == 0 {
            return Err(PlannerError::Config(
                "max tokens must be greater than zero".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(PlannerError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if let Some(temperature) = self.options.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(PlannerError::Config(format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    temperature
                )));
            }
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| PlannerError::Config(format!("{} has an invalid value: {}", key, value)))
}
