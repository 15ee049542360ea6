use lh_domain::config::SummarizerConfig;
use lh_domain::error::Result;
use lh_domain::trace::TraceEvent;
use lh_providers::RoleBinding;

use crate::prompts::{chunk_message, CHUNK_SUMMARY_PROMPT};

/// Summarizes one chunk of a reduced report's text per request.
///
/// Service failures propagate; falling back is the pipeline's job.
#[derive(Clone)]
pub struct ChunkSummarizer {
    binding: RoleBinding,
    temperature: f32,
    max_tokens: u32,
}

impl ChunkSummarizer {
    pub fn new(binding: RoleBinding, config: &SummarizerConfig) -> Self {
        Self {
            binding,
            temperature: config.temperature,
            max_tokens: config.chunk_max_tokens,
        }
    }

    /// Summarize `chunk`, the `index`-th (1-based) of `total`.
    pub async fn summarize_chunk(&self, chunk: &str, index: usize, total: usize) -> Result<String> {
        let chunk_chars = chunk.chars().count();
        tracing::debug!(chunk = index, total, chars = chunk_chars, "summarizing chunk");

        let summary = super::complete(
            &self.binding,
            CHUNK_SUMMARY_PROMPT,
            chunk_message(index, total, chunk),
            self.temperature,
            self.max_tokens,
        )
        .await?;

        TraceEvent::ChunkSummarized {
            index,
            total,
            chunk_chars,
            summary_chars: summary.chars().count(),
        }
        .emit();

        Ok(summary)
    }
}
