//! One-shot commands: `reduce`, `inspect`, `summarize`, `ask`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lh_contextpack::snapshot::snapshot;
use lh_contextpack::{parse_report, ReportReducer, ValidatedReport};
use lh_domain::config::Config;
use lh_providers::ProviderRegistry;

use crate::runtime::{Assistant, ReportSummaryPipeline};
use crate::session::ReportSet;

fn read_report(path: &Path) -> anyhow::Result<ValidatedReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_report(&text).with_context(|| format!("loading {}", path.display()))
}

/// Print the reduced report as pretty JSON.
pub fn reduce(config: &Config, file: &Path, stats: bool) -> anyhow::Result<()> {
    let validated = read_report(file)?;
    let reducer = ReportReducer::new(config.reduction.max_value_chars);
    let (reduced, report) = reducer.reduce_with_report(&validated.report);

    println!("{}", reduced.to_text());
    if stats {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

/// Print the category snapshot as pretty JSON.
pub fn inspect(file: &Path) -> anyhow::Result<()> {
    let validated = read_report(file)?;
    if !validated.missing.is_empty() {
        eprintln!("missing categories: {}", validated.missing.join(", "));
    }
    println!("{}", serde_json::to_string_pretty(&snapshot(&validated.report))?);
    Ok(())
}

/// Summarize each report in turn and print the summaries under their
/// file names.
pub async fn summarize(config: &Config, files: &[PathBuf]) -> anyhow::Result<()> {
    let registry = ProviderRegistry::from_config(&config.llm);
    let pipeline = ReportSummaryPipeline::from_config(config, &registry);

    for file in files {
        let validated = read_report(file)?;
        let summary = pipeline.summarize(&validated.report).await;
        println!("### {}\n\n{summary}\n", file.display());
    }
    Ok(())
}

/// Answer one question with the given reports as context.
pub async fn ask(
    config: &Config,
    question: String,
    report_files: &[PathBuf],
    temperature: Option<f32>,
) -> anyhow::Result<()> {
    let registry = ProviderRegistry::from_config(&config.llm);
    let assistant = Assistant::from_config(config, &registry);

    let mut reports = ReportSet::new();
    for file in report_files {
        reports
            .load_file(file)
            .with_context(|| format!("loading {}", file.display()))?;
    }

    let history = [lh_domain::message::Message::user(question)];
    let temperature = temperature.unwrap_or(config.chat.temperature);
    let answer = assistant.respond(&history, &reports, temperature).await?;
    println!("{answer}");
    Ok(())
}
