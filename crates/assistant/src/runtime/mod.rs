//! Async orchestration over the completion service: chunk summaries,
//! fusion, the report summary pipeline, and question answering.

pub mod answer;
pub mod fuse;
pub mod pipeline;
pub mod summarize;

pub use answer::Assistant;
pub use fuse::{SummaryFuser, SUMMARY_SEPARATOR};
pub use pipeline::{ReportSummary, ReportSummaryPipeline};
pub use summarize::ChunkSummarizer;

use lh_domain::error::Result;
use lh_domain::message::Message;
use lh_providers::{ChatRequest, RoleBinding};

/// One system + user exchange against a role binding, returning the
/// completion text as-is.
pub(crate) async fn complete(
    binding: &RoleBinding,
    system: &str,
    user: String,
    temperature: f32,
    max_tokens: u32,
) -> Result<String> {
    let req = ChatRequest {
        messages: vec![Message::system(system), Message::user(user)],
        temperature: Some(temperature),
        max_tokens: Some(max_tokens),
        model: binding.model.clone(),
    };
    let resp = binding.provider.chat(&req).await?;
    Ok(resp.content)
}
