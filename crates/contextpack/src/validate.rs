use lh_domain::error::{Error, Result};
use lh_domain::trace::TraceEvent;
use serde_json::Value;

/// Top-level keys every Lighthouse report carries.
const REQUIRED_KEYS: &[&str] = &["lighthouseVersion", "categories"];

/// Categories the assistant specializes in. At least one must be present.
pub const TARGET_CATEGORIES: &[&str] = &["performance", "accessibility", "seo"];

/// A parsed report that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedReport {
    pub lighthouse_version: String,
    /// Target categories present, in [`TARGET_CATEGORIES`] order.
    pub available: Vec<&'static str>,
    /// Target categories absent, in [`TARGET_CATEGORIES`] order.
    pub missing: Vec<&'static str>,
    pub report: Value,
}

/// Parse and validate the text of an uploaded report.
///
/// Empty or whitespace-only input and unparseable JSON fail with
/// [`Error::InvalidInput`]; everything [`validate_report`] rejects fails
/// with [`Error::InvalidReport`].
pub fn parse_report(json_text: &str) -> Result<ValidatedReport> {
    if json_text.trim().is_empty() {
        return Err(Error::InvalidInput("JSON string cannot be empty".into()));
    }

    let report: Value = serde_json::from_str(json_text)
        .map_err(|e| Error::InvalidInput(format!("invalid JSON: {e}")))?;

    validate_report(report)
}

/// Validate an already-parsed report.
pub fn validate_report(report: Value) -> Result<ValidatedReport> {
    for &key in REQUIRED_KEYS {
        if report.get(key).is_none() {
            return Err(Error::InvalidReport(format!(
                "not a valid Lighthouse report: missing '{key}'"
            )));
        }
    }

    let categories = &report["categories"];
    let (available, missing): (Vec<&'static str>, Vec<&'static str>) = TARGET_CATEGORIES
        .iter()
        .copied()
        .partition(|c| categories.get(*c).is_some());

    if available.is_empty() {
        return Err(Error::InvalidReport(format!(
            "the report does not contain any of the required categories: {}",
            TARGET_CATEGORIES.join(", ")
        )));
    }

    let lighthouse_version = match &report["lighthouseVersion"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    tracing::info!(
        version = %lighthouse_version,
        available = %available.join(", "),
        "Lighthouse report validated"
    );
    if !missing.is_empty() {
        tracing::warn!(missing = %missing.join(", "), "categories not available");
    }
    TraceEvent::ReportValidated {
        lighthouse_version: lighthouse_version.clone(),
        available: available.iter().map(|s| s.to_string()).collect(),
        missing: missing.iter().map(|s| s.to_string()).collect(),
    }
    .emit();

    Ok(ValidatedReport {
        lighthouse_version,
        available,
        missing,
        report,
    })
}
