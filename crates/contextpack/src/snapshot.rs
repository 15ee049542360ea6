//! Per-category snapshot of a report: the category score plus the handful
//! of audits that matter most for it.

use serde::Serialize;
use serde_json::Value;

const PERFORMANCE_AUDITS: &[&str] = &[
    "first-contentful-paint",
    "speed-index",
    "largest-contentful-paint",
    "total-blocking-time",
    "cumulative-layout-shift",
];

const ACCESSIBILITY_AUDITS: &[&str] = &[
    "aria-allowed-attr",
    "aria-hidden-body",
    "aria-required-attr",
    "aria-required-children",
    "aria-required-parent",
    "aria-roles",
    "aria-valid-attr-value",
    "aria-valid-attr",
    "button-name",
    "duplicate-id-aria",
    "image-alt",
    "input-button-name",
    "input-image-alt",
    "meta-refresh",
    "meta-viewport",
    "td-has-header",
    "video-caption",
];

const SEO_AUDITS: &[&str] = &[
    "document-title",
    "meta-description",
    "http-status-code",
    "link-text",
    "crawlable-anchors",
    "is-crawlable",
    "robots-txt",
    "image-alt",
    "hreflang",
    "canonical",
    "font-size",
    "tap-targets",
];

#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    pub report_info: ReportInfo,
    pub performance: Option<CategorySnapshot>,
    pub accessibility: Option<CategorySnapshot>,
    pub seo: Option<CategorySnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportInfo {
    pub lighthouse_version: Option<String>,
    pub requested_url: Option<String>,
    pub fetch_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySnapshot {
    /// 0 – 100. `None` when the category has no score.
    pub score: Option<f64>,
    pub audits: Vec<AuditMetric>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditMetric {
    pub id: String,
    pub score: Option<f64>,
    pub numeric_value: Option<f64>,
    pub display_value: Option<String>,
}

/// Build the snapshot of a (validated) raw report.
pub fn snapshot(report: &Value) -> ReportSnapshot {
    ReportSnapshot {
        report_info: ReportInfo {
            lighthouse_version: string_field(report, "lighthouseVersion"),
            requested_url: string_field(report, "requestedUrl"),
            fetch_time: string_field(report, "fetchTime"),
        },
        performance: category(report, "performance", PERFORMANCE_AUDITS),
        accessibility: category(report, "accessibility", ACCESSIBILITY_AUDITS),
        seo: category(report, "seo", SEO_AUDITS),
    }
}

fn category(report: &Value, id: &str, audit_ids: &[&str]) -> Option<CategorySnapshot> {
    let cat = report.get("categories")?.get(id)?;
    let score = cat.get("score").and_then(Value::as_f64).map(|s| s * 100.0);

    let audits = report.get("audits");
    let audits = audit_ids
        .iter()
        .filter_map(|&audit_id| {
            let audit = audits?.get(audit_id)?;
            Some(AuditMetric {
                id: audit_id.to_string(),
                score: audit.get("score").and_then(Value::as_f64),
                numeric_value: audit.get("numericValue").and_then(Value::as_f64),
                display_value: audit
                    .get("displayValue")
                    .and_then(Value::as_str)
                    .map(String::from),
            })
        })
        .collect();

    Some(CategorySnapshot { score, audits })
}

fn string_field(report: &Value, key: &str) -> Option<String> {
    match report.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
