mod chat;
mod llm;
mod logging;
mod summarizer;

pub use chat::*;
pub use llm::*;
pub use logging::*;
pub use summarizer::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub reduction: ReductionConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl ConfigError {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.reduction.max_value_chars == 0 {
            errors.push(ConfigError::error(
                "reduction.max_value_chars",
                "must be greater than 0",
            ));
        }

        if self.summarizer.chunk_chars == 0 {
            errors.push(ConfigError::error(
                "summarizer.chunk_chars",
                "must be greater than 0",
            ));
        }

        if self.summarizer.max_concurrency == 0 {
            errors.push(ConfigError::error(
                "summarizer.max_concurrency",
                "must be greater than 0",
            ));
        }

        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.summarizer.temperature) {
            errors.push(ConfigError::error(
                "summarizer.temperature",
                format!("must be within {MIN_TEMPERATURE}..={MAX_TEMPERATURE}"),
            ));
        }

        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.chat.temperature) {
            errors.push(ConfigError::error(
                "chat.temperature",
                format!("must be within {MIN_TEMPERATURE}..={MAX_TEMPERATURE}"),
            ));
        }

        // Warn when no LLM providers are configured.
        if self.llm.providers.is_empty() {
            errors.push(ConfigError::warning(
                "llm.providers",
                "no LLM providers configured; summaries will fall back to category scores",
            ));
        }

        // Validate each provider has a non-empty id and base_url.
        for (i, provider) in self.llm.providers.iter().enumerate() {
            if provider.id.is_empty() {
                errors.push(ConfigError::error(
                    format!("llm.providers[{i}].id"),
                    "provider id must not be empty",
                ));
            }
            if provider.base_url.is_empty() {
                errors.push(ConfigError::error(
                    format!("llm.providers[{i}].base_url"),
                    "provider base_url must not be empty",
                ));
            }
        }

        // Roles must point at a configured provider.
        let mut role_names: Vec<&String> = self.llm.roles.keys().collect();
        role_names.sort();
        for name in role_names {
            let role = &self.llm.roles[name];
            let (provider_id, _) = role.split();
            if !self.llm.providers.iter().any(|p| p.id == provider_id) {
                errors.push(ConfigError::warning(
                    format!("llm.roles.{name}.model"),
                    format!("unknown provider \"{provider_id}\""),
                ));
            }
        }

        errors
    }
}
