//! Provider registry.
//!
//! Constructs and holds all configured LLM provider instances. At startup the
//! registry reads the [`LlmConfig`], resolves authentication (env vars, direct
//! keys), and instantiates the adapter for each configured provider.

use crate::openai_compat::OpenAiCompatProvider;
use crate::traits::LlmProvider;
use lh_domain::config::{LlmConfig, ProviderKind, RoleConfig};
use lh_domain::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ProviderRegistry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A provider resolved for a role, plus the model the role asks for.
#[derive(Clone)]
pub struct RoleBinding {
    pub provider: Arc<dyn LlmProvider>,
    /// `None` lets the provider use its default model.
    pub model: Option<String>,
}

/// Holds all instantiated LLM providers and role assignments.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
    roles: HashMap<String, RoleConfig>,
}

impl ProviderRegistry {
    /// Build the registry from the application's [`LlmConfig`].
    ///
    /// Auth keys are resolved eagerly (env vars are read at this point).
    /// Providers that fail to initialize are logged and skipped. A role
    /// pointing at a skipped provider resolves to `None` in
    /// [`for_role`](Self::for_role), so no request is ever sent for it.
    pub fn from_config(config: &LlmConfig) -> Self {
        let timeout = Duration::from_millis(config.default_timeout_ms);
        let mut providers: HashMap<String, Arc<dyn LlmProvider>> = HashMap::new();

        for pc in &config.providers {
            let result: Result<Arc<dyn LlmProvider>> = match pc.kind {
                ProviderKind::OpenaiCompat => OpenAiCompatProvider::from_config(pc, timeout)
                    .map(|p| Arc::new(p) as Arc<dyn LlmProvider>),
            };

            match result {
                Ok(provider) => {
                    tracing::info!(
                        provider_id = %pc.id,
                        kind = ?pc.kind,
                        "registered LLM provider"
                    );
                    providers.insert(pc.id.clone(), provider);
                }
                Err(e) => {
                    tracing::warn!(
                        provider_id = %pc.id,
                        kind = ?pc.kind,
                        error = %e,
                        "failed to initialize LLM provider, skipping"
                    );
                }
            }
        }

        if providers.is_empty() {
            tracing::warn!(
                "no LLM providers initialized; summaries will fall back to \
                 category scores until auth is configured"
            );
        }

        Self {
            providers,
            roles: config.roles.clone(),
        }
    }

    /// Register (or replace) a provider under its own id.
    pub fn register(&mut self, provider: Arc<dyn LlmProvider>) {
        self.providers
            .insert(provider.provider_id().to_string(), provider);
    }

    /// Assign a role to a "provider_id/model_name" spec.
    pub fn assign_role(&mut self, role: &str, spec: impl Into<String>) {
        self.roles
            .insert(role.to_string(), RoleConfig { model: spec.into() });
    }

    /// Look up a provider by its config id.
    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(provider_id).cloned()
    }

    /// Get the provider and model assigned to a role (e.g. "summarizer").
    /// `None` when the role is unassigned or its provider did not start.
    pub fn for_role(&self, role: &str) -> Option<RoleBinding> {
        let (provider_id, model) = self.roles.get(role)?.split();
        let provider = self.providers.get(provider_id).cloned()?;
        Some(RoleBinding {
            provider,
            model: model.map(String::from),
        })
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// List all registered provider IDs (sorted).
    pub fn list_providers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// List roles and their assigned model specs, sorted by role.
    pub fn list_roles(&self) -> Vec<(String, String)> {
        let mut roles: Vec<(String, String)> = self
            .roles
            .iter()
            .map(|(name, cfg)| (name.clone(), cfg.model.clone()))
            .collect();
        roles.sort();
        roles
    }
}
