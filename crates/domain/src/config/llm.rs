use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM provider system
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Role that summarizes report chunks and fuses partial summaries.
pub const ROLE_SUMMARIZER: &str = "summarizer";
/// Role that answers the user's questions.
pub const ROLE_ASSISTANT: &str = "assistant";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Per-request timeout. A request that exceeds it fails like any
    /// other service error.
    #[serde(default = "d_60000u")]
    pub default_timeout_ms: u64,
    /// Model roles: summarizer, assistant (+ custom).
    /// Format of each entry: "provider_id/model_name".
    #[serde(default = "d_roles")]
    pub roles: HashMap<String, RoleConfig>,
    /// Registered LLM providers (data-driven: adding a provider = adding config).
    #[serde(default = "d_providers")]
    pub providers: Vec<ProviderConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: 60_000,
            roles: d_roles(),
            providers: d_providers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Format: "provider_id/model_name"
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub kind: ProviderKind,
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Any endpoint following the OpenAI chat completions contract
    /// (Groq, OpenAI, Ollama, vLLM, LM Studio, ...).
    OpenaiCompat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Header name (e.g. "Authorization", "api-key").
    #[serde(default)]
    pub header: Option<String>,
    /// Header value prefix (e.g. "Bearer ").
    #[serde(default)]
    pub prefix: Option<String>,
    /// Env var containing the key.
    #[serde(default)]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env).
    #[serde(default)]
    pub key: Option<String>,
    /// Endpoint needs no key at all (local Ollama, vLLM).
    #[serde(default)]
    pub none: bool,
}

impl RoleConfig {
    /// Split "provider_id/model_name" into its two halves. A spec without
    /// a slash names only the provider.
    pub fn split(&self) -> (&str, Option<&str>) {
        match self.model.split_once('/') {
            Some((provider, model)) if !model.is_empty() => (provider, Some(model)),
            Some((provider, _)) => (provider, None),
            None => (self.model.as_str(), None),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_60000u() -> u64 {
    60_000
}

fn d_providers() -> Vec<ProviderConfig> {
    vec![ProviderConfig {
        id: "groq".into(),
        kind: ProviderKind::OpenaiCompat,
        base_url: "https://api.groq.com/openai/v1".into(),
        auth: AuthConfig {
            env: Some("GROQ_API_KEY".into()),
            ..Default::default()
        },
        default_model: Some("llama-3.3-70b-versatile".into()),
    }]
}

fn d_roles() -> HashMap<String, RoleConfig> {
    let mut roles = HashMap::new();
    roles.insert(
        ROLE_SUMMARIZER.to_string(),
        RoleConfig {
            model: "groq/llama-3.1-8b-instant".into(),
        },
    );
    roles.insert(
        ROLE_ASSISTANT.to_string(),
        RoleConfig {
            model: "groq/llama-3.3-70b-versatile".into(),
        },
    );
    roles
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
