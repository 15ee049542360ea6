use lh_domain::config::SummarizerConfig;
use lh_domain::error::Result;
use lh_domain::trace::TraceEvent;
use lh_providers::RoleBinding;

use crate::prompts::FUSION_PROMPT;

/// Placed between chunk summaries when they are joined.
pub const SUMMARY_SEPARATOR: &str = "\n\n---\n\n";

/// Combines ordered chunk summaries into one.
#[derive(Clone)]
pub struct SummaryFuser {
    binding: RoleBinding,
    temperature: f32,
    max_tokens: u32,
    threshold_chars: usize,
}

impl SummaryFuser {
    pub fn new(binding: RoleBinding, config: &SummarizerConfig) -> Self {
        Self {
            binding,
            temperature: config.temperature,
            max_tokens: config.fusion_max_tokens,
            threshold_chars: config.fusion_threshold_chars,
        }
    }

    /// A single summary comes back unchanged and no summaries give an
    /// empty string, neither touching the service. Otherwise the summaries
    /// are joined in order; only a join longer than the threshold is sent
    /// back for compression.
    pub async fn fuse(&self, mut summaries: Vec<String>) -> Result<String> {
        match summaries.len() {
            0 => return Ok(String::new()),
            1 => return Ok(summaries.swap_remove(0)),
            _ => {}
        }

        let parts = summaries.len();
        let joined = summaries.join(SUMMARY_SEPARATOR);
        let joined_chars = joined.chars().count();
        let compressed = joined_chars > self.threshold_chars;

        tracing::info!(parts, chars = joined_chars, compressed, "fusing chunk summaries");
        TraceEvent::SummaryFused {
            parts,
            joined_chars,
            compressed,
        }
        .emit();

        if !compressed {
            return Ok(joined);
        }

        super::complete(
            &self.binding,
            FUSION_PROMPT,
            joined,
            self.temperature,
            self.max_tokens,
        )
        .await
    }
}
