use futures_util::{stream, StreamExt, TryStreamExt};
use lh_contextpack::injection::format_fallback_summary;
use lh_contextpack::{chunk, BoundedReport, ReportReducer};
use lh_domain::config::{Config, SummarizerConfig, ROLE_SUMMARIZER};
use lh_domain::error::{Error, Result};
use lh_domain::trace::TraceEvent;
use lh_providers::{ProviderRegistry, RoleBinding};
use serde_json::Value;

use super::{ChunkSummarizer, SummaryFuser};

/// A report summary, and whether it is the locally built fallback rather
/// than a model summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub text: String,
    pub degraded: bool,
}

/// Reduce → chunk → summarize each chunk → fuse.
///
/// [`summarize`](Self::summarize) never fails: any error past reduction
/// becomes a locally built summary listing the category scores.
pub struct ReportSummaryPipeline {
    reducer: ReportReducer,
    chunk_chars: usize,
    max_concurrency: usize,
    /// `None` when no provider serves the summarizer role; every run then
    /// takes the fallback path.
    stages: Option<(ChunkSummarizer, SummaryFuser)>,
}

impl ReportSummaryPipeline {
    pub fn new(
        reducer: ReportReducer,
        config: &SummarizerConfig,
        binding: Option<RoleBinding>,
    ) -> Self {
        let stages = binding.map(|b| {
            (
                ChunkSummarizer::new(b.clone(), config),
                SummaryFuser::new(b, config),
            )
        });
        Self {
            reducer,
            chunk_chars: config.chunk_chars.max(1),
            max_concurrency: config.max_concurrency.max(1),
            stages,
        }
    }

    /// Build from the loaded config, resolving the summarizer role.
    pub fn from_config(config: &Config, registry: &ProviderRegistry) -> Self {
        let binding = registry.for_role(ROLE_SUMMARIZER);
        if binding.is_none() {
            tracing::warn!(
                role = ROLE_SUMMARIZER,
                "no provider for role; report summaries will use the fallback"
            );
        }
        Self::new(
            ReportReducer::new(config.reduction.max_value_chars),
            &config.summarizer,
            binding,
        )
    }

    /// Summarize a raw report. Always returns a non-empty string.
    pub async fn summarize(&self, report: &Value) -> String {
        self.summarize_report(report).await.text
    }

    /// Like [`summarize`](Self::summarize), but flags a fallback result so
    /// callers that keep summaries can retry it later.
    pub async fn summarize_report(&self, report: &Value) -> ReportSummary {
        let (reduced, stats) = self.reducer.reduce_with_report(report);
        tracing::debug!(
            raw_chars = stats.raw_chars,
            reduced_chars = stats.reduced_chars,
            items_elided = stats.items_elided,
            "report reduced"
        );
        stats.emit();

        let error = match self.summarize_reduced(&reduced).await {
            Ok(text) if !text.trim().is_empty() => {
                return ReportSummary {
                    text,
                    degraded: false,
                }
            }
            Ok(_) => Error::Other("empty summary".into()),
            Err(e) => e,
        };
        ReportSummary {
            text: self.fallback(&reduced, &error),
            degraded: true,
        }
    }

    /// The fallible part of [`summarize`](Self::summarize), run on an
    /// already reduced report.
    pub async fn summarize_reduced(&self, reduced: &BoundedReport) -> Result<String> {
        let (summarizer, fuser) = self.stages.as_ref().ok_or_else(|| {
            Error::Config(format!("no provider available for role '{ROLE_SUMMARIZER}'"))
        })?;

        let text = reduced.to_text();
        let chunks = chunk(&text, self.chunk_chars);
        let total = chunks.len();

        // Completion order may differ from chunk order; `buffered` yields in
        // input order, which is the order the fuser must see.
        let summaries: Vec<String> = stream::iter(chunks.into_iter().enumerate())
            .map(|(i, piece)| summarizer.summarize_chunk(piece, i + 1, total))
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        fuser.fuse(summaries).await
    }

    fn fallback(&self, reduced: &BoundedReport, error: &Error) -> String {
        let categories = reduced.category_scores();
        tracing::warn!(
            error = %error,
            external = error.is_external_service(),
            categories = categories.len(),
            "report summarization failed, using fallback"
        );
        TraceEvent::SummaryFallback {
            reason: error.to_string(),
            categories: categories.len(),
        }
        .emit();
        format_fallback_summary(&error.to_string(), &categories)
    }
}
