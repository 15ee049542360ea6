use serde::Serialize;

/// Structured trace events emitted across all lighthouse-assistant crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    ReportValidated {
        lighthouse_version: String,
        available: Vec<String>,
        missing: Vec<String>,
    },
    ReportReduced {
        raw_chars: usize,
        reduced_chars: usize,
        audits: usize,
        items_elided: usize,
        oversized_values: usize,
    },
    ChunkSummarized {
        index: usize,
        total: usize,
        chunk_chars: usize,
        summary_chars: usize,
    },
    SummaryFused {
        parts: usize,
        joined_chars: usize,
        compressed: bool,
    },
    SummaryFallback {
        reason: String,
        categories: usize,
    },
    LlmRequest {
        provider: String,
        model: String,
        duration_ms: u64,
        prompt_tokens: Option<u32>,
        completion_tokens: Option<u32>,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "lh_event");
    }
}
