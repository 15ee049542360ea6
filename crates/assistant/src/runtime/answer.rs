use std::sync::Arc;

use lh_contextpack::injection::format_reports_context;
use lh_domain::config::{clamp_temperature, Config, ROLE_ASSISTANT};
use lh_domain::error::{Error, Result};
use lh_domain::message::Message;
use lh_providers::{ChatRequest, ProviderRegistry, RoleBinding};

use super::ReportSummaryPipeline;
use crate::prompts::ASSISTANT_SYSTEM_PROMPT;
use crate::session::ReportSet;

/// Answers questions with the loaded reports' summaries as context.
pub struct Assistant {
    binding: Option<RoleBinding>,
    pipeline: Arc<ReportSummaryPipeline>,
    max_tokens: u32,
}

impl Assistant {
    pub fn new(
        binding: Option<RoleBinding>,
        pipeline: Arc<ReportSummaryPipeline>,
        max_tokens: u32,
    ) -> Self {
        Self {
            binding,
            pipeline,
            max_tokens,
        }
    }

    /// Build from the loaded config: the assistant role answers, the
    /// summarizer role feeds the pipeline.
    pub fn from_config(config: &Config, registry: &ProviderRegistry) -> Self {
        let pipeline = Arc::new(ReportSummaryPipeline::from_config(config, registry));
        Self::new(
            registry.for_role(ROLE_ASSISTANT),
            pipeline,
            config.chat.max_tokens,
        )
    }

    /// Summarize every report that has no summary yet, or only a fallback
    /// one, and keep the result on the report. A fallback is kept for the
    /// current turn and retried on the next call.
    pub async fn summarize_missing(&self, reports: &mut ReportSet) {
        for loaded in reports.iter_mut().filter(|r| r.needs_summary()) {
            tracing::info!(
                report = %loaded.name,
                retry = loaded.summary.is_some(),
                "summarizing report"
            );
            let summary = self.pipeline.summarize_report(&loaded.validated.report).await;
            if summary.degraded {
                tracing::warn!(report = %loaded.name, "summary degraded; will retry next turn");
            }
            loaded.summary = Some(summary);
        }
    }

    /// Answer the last turn of `history`.
    ///
    /// Reports without a stored summary are summarized for this call only.
    /// Summaries never fail (see [`ReportSummaryPipeline::summarize`]); the
    /// answering call itself can, and its error is returned.
    pub async fn respond(
        &self,
        history: &[Message],
        reports: &ReportSet,
        temperature: f32,
    ) -> Result<String> {
        let binding = self.binding.as_ref().ok_or_else(|| {
            Error::Config(format!("no provider available for role '{ROLE_ASSISTANT}'"))
        })?;

        let mut summaries: Vec<(&str, String)> = Vec::with_capacity(reports.len());
        for loaded in reports.iter() {
            let summary = match loaded.summary_text() {
                Some(s) => s.to_string(),
                None => self.pipeline.summarize(&loaded.validated.report).await,
            };
            summaries.push((loaded.name.as_str(), summary));
        }

        let req = ChatRequest {
            messages: build_messages(history, &summaries),
            temperature: Some(clamp_temperature(temperature)),
            max_tokens: Some(self.max_tokens),
            model: binding.model.clone(),
        };
        tracing::debug!(
            messages = req.messages.len(),
            reports = summaries.len(),
            "sending question"
        );

        let resp = binding.provider.chat(&req).await?;
        Ok(resp.content)
    }
}

/// System message (instructions plus report context) followed by the
/// conversation.
pub fn build_messages<N: AsRef<str>, S: AsRef<str>>(
    history: &[Message],
    summaries: &[(N, S)],
) -> Vec<Message> {
    let context = format_reports_context(summaries);
    let system = if context.is_empty() {
        ASSISTANT_SYSTEM_PROMPT.to_string()
    } else {
        format!("{ASSISTANT_SYSTEM_PROMPT}\n\n{context}")
    };

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(system));
    messages.extend_from_slice(history);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use lh_domain::message::Role;

    #[test]
    fn no_reports_plain_system_prompt() {
        let none: &[(&str, &str)] = &[];
        let msgs = build_messages(&[Message::user("What is LCP?")], none);
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].content, ASSISTANT_SYSTEM_PROMPT);
        assert_eq!(msgs[1].role, Role::User);
    }

    #[test]
    fn reports_appended_to_system_prompt() {
        let msgs = build_messages(
            &[Message::user("Why is it slow?")],
            &[("home.json", "Performance 45/100")],
        );
        assert!(msgs[0].content.starts_with(ASSISTANT_SYSTEM_PROMPT));
        assert!(msgs[0].content.contains("### Report: home.json"));
        assert!(msgs[0].content.contains("Performance 45/100"));
    }
}
