//! Scripted completion service shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lh_domain::error::{Error, Result};
use lh_providers::{ChatRequest, ChatResponse, LlmProvider, RoleBinding};

/// What the provider does for one call.
pub enum Reply {
    Text(String),
    Fail(Error),
}

/// Replays queued replies in order and records every request. When the
/// queue runs dry it answers with `default`.
pub struct ScriptedProvider {
    id: String,
    queue: Mutex<VecDeque<Reply>>,
    default: Box<dyn Fn(&ChatRequest) -> Result<String> + Send + Sync>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    /// Echoes the user message back, prefixed with "summary of ".
    pub fn echo() -> Arc<Self> {
        Arc::new(Self::with_default(|req| {
            let user = req
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(format!("summary of {user}"))
        }))
    }

    /// Fails every call with an HTTP error.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self::with_default(|_| {
            Err(Error::Http("connection refused".into()))
        }))
    }

    pub fn with_default(
        default: impl Fn(&ChatRequest) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: "scripted".into(),
            queue: Mutex::new(VecDeque::new()),
            default: Box::new(default),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, reply: Reply) {
        self.queue.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let next = self.queue.lock().unwrap().pop_front();
        let content = match next {
            Some(Reply::Text(t)) => t,
            Some(Reply::Fail(e)) => return Err(e),
            None => (self.default)(req)?,
        };
        Ok(ChatResponse {
            content,
            usage: None,
            model: req.model.clone().unwrap_or_else(|| "scripted-model".into()),
            finish_reason: Some("stop".into()),
        })
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

pub fn binding(provider: Arc<ScriptedProvider>) -> RoleBinding {
    RoleBinding {
        provider,
        model: Some("test-model".into()),
    }
}
