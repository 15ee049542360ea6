use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Report reduction
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// Strings longer than this (in characters) are replaced by a
    /// placeholder carrying their original length.
    #[serde(default = "d_5000")]
    pub max_value_chars: usize,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            max_value_chars: 5_000,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Chunked summarization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Chunked summarization of a reduced report.
///
/// The reduced report is serialized, split into `chunk_chars` pieces,
/// each piece is summarized, and the partial summaries are fused. Fusion
/// only calls the model again when the joined text exceeds
/// `fusion_threshold_chars` (roughly 5000 tokens at 3 chars/token).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default = "d_3000")]
    pub chunk_chars: usize,
    #[serde(default = "d_800")]
    pub chunk_max_tokens: u32,
    #[serde(default = "d_1500")]
    pub fusion_max_tokens: u32,
    #[serde(default = "d_15000")]
    pub fusion_threshold_chars: usize,
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    /// Chunk requests in flight at once. 1 keeps calls strictly sequential;
    /// summaries are always fused in chunk order.
    #[serde(default = "d_1")]
    pub max_concurrency: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 3_000,
            chunk_max_tokens: 800,
            fusion_max_tokens: 1_500,
            fusion_threshold_chars: 15_000,
            temperature: 0.3,
            max_concurrency: 1,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_5000() -> usize {
    5_000
}
fn d_3000() -> usize {
    3_000
}
fn d_800() -> u32 {
    800
}
fn d_1500() -> u32 {
    1_500
}
fn d_15000() -> usize {
    15_000
}
fn d_temperature() -> f32 {
    0.3
}
fn d_1() -> usize {
    1
}
