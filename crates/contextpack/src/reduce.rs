use serde_json::{Map, Value};

use crate::bound::bound_counting;
use crate::report::ReductionReport;

/// Top-level fields copied verbatim when present.
pub const TOP_LEVEL_FIELDS: &[&str] = &[
    "finalUrl",
    "requestedUrl",
    "fetchTime",
    "userAgent",
    "environment",
    "runtimeError",
    "timing",
];

const CONFIG_SETTINGS_FIELDS: &[&str] = &["emulatedFormFactor", "locale", "onlyCategories"];

const CATEGORY_FIELDS: &[&str] = &["id", "title", "score", "description"];

const AUDIT_FIELDS: &[&str] = &[
    "score",
    "title",
    "description",
    "scoreDisplayMode",
    "displayValue",
    "numericValue",
    "numericUnit",
];

/// A Lighthouse report cut down to the allow-listed fields, with every
/// string bounded. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedReport {
    tree: Value,
}

/// One category's title and score as found in a [`BoundedReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub id: String,
    pub title: String,
    /// Raw 0.0 – 1.0 score. `None` when Lighthouse could not score it.
    pub score: Option<f64>,
}

impl CategoryScore {
    /// Score on the 0 – 100 scale, rounded to an integer.
    pub fn percent(&self) -> Option<u8> {
        self.score
            .filter(|s| s.is_finite())
            .map(|s| (s * 100.0).round().clamp(0.0, 100.0) as u8)
    }
}

impl BoundedReport {
    pub fn as_value(&self) -> &Value {
        &self.tree
    }

    /// Pretty-printed JSON (two-space indent), the form that gets chunked.
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(&self.tree).unwrap_or_else(|_| self.tree.to_string())
    }

    /// Category id, title and score in report order.
    pub fn category_scores(&self) -> Vec<CategoryScore> {
        let Some(categories) = self.tree.get("categories").and_then(Value::as_object) else {
            return Vec::new();
        };
        categories
            .iter()
            .map(|(id, data)| CategoryScore {
                id: id.clone(),
                title: data
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or(id.as_str())
                    .to_string(),
                score: data.get("score").and_then(Value::as_f64),
            })
            .collect()
    }
}

/// Reduces raw reports to [`BoundedReport`]s.
///
/// Pure: no I/O, never fails. Missing or malformed sub-objects are left
/// out of the result rather than reported.
#[derive(Debug, Clone, Copy)]
pub struct ReportReducer {
    pub max_value_chars: usize,
}

impl Default for ReportReducer {
    fn default() -> Self {
        Self {
            max_value_chars: 5_000,
        }
    }
}

impl ReportReducer {
    pub fn new(max_value_chars: usize) -> Self {
        Self { max_value_chars }
    }

    pub fn reduce(&self, report: &Value) -> BoundedReport {
        self.reduce_with_report(report).0
    }

    /// Reduce and return statistics about what was cut.
    pub fn reduce_with_report(&self, report: &Value) -> (BoundedReport, ReductionReport) {
        let mut stats = ReductionReport {
            raw_chars: char_len(report),
            ..Default::default()
        };

        let Some(raw) = report.as_object() else {
            let empty = BoundedReport {
                tree: Value::Object(Map::new()),
            };
            stats.reduced_chars = char_len(&empty.tree);
            return (empty, stats);
        };

        let mut out = Map::new();

        for &field in TOP_LEVEL_FIELDS {
            if let Some(v) = raw.get(field) {
                out.insert(field.to_string(), v.clone());
            }
        }

        if let Some(settings) = raw.get("configSettings").and_then(Value::as_object) {
            out.insert(
                "configSettings".into(),
                Value::Object(pick(settings, CONFIG_SETTINGS_FIELDS)),
            );
        }

        if let Some(categories) = raw.get("categories").and_then(Value::as_object) {
            let reduced: Map<String, Value> = categories
                .iter()
                .filter_map(|(id, data)| {
                    let data = data.as_object()?;
                    Some((id.clone(), Value::Object(pick(data, CATEGORY_FIELDS))))
                })
                .collect();
            out.insert("categories".into(), Value::Object(reduced));
        }

        if let Some(audits) = raw.get("audits").and_then(Value::as_object) {
            let mut reduced = Map::with_capacity(audits.len());
            for (id, data) in audits {
                let Some(data) = data.as_object() else {
                    continue;
                };
                reduced.insert(id.clone(), Value::Object(reduce_audit(data, &mut stats)));
            }
            stats.audits = reduced.len();
            if !reduced.is_empty() {
                out.insert("audits".into(), Value::Object(reduced));
            }
        }

        let tree = bound_counting(
            Value::Object(out),
            self.max_value_chars,
            &mut stats.oversized_values,
        );
        stats.reduced_chars = char_len(&tree);

        (BoundedReport { tree }, stats)
    }
}

fn reduce_audit(audit: &Map<String, Value>, stats: &mut ReductionReport) -> Map<String, Value> {
    let mut out = pick(audit, AUDIT_FIELDS);

    if let Some(details) = audit.get("details").and_then(Value::as_object) {
        let mut reduced = Map::new();
        if let Some(summary) = details.get("summary") {
            reduced.insert("summary".into(), summary.clone());
        }
        if let Some(kind) = details.get("type") {
            reduced.insert("type".into(), kind.clone());
        }
        // Item arrays are the bulk of a real report; keep only their count.
        if let Some(items) = details.get("items").and_then(Value::as_array) {
            reduced.insert("itemsCount".into(), Value::from(items.len()));
            stats.items_elided += items.len();
        }
        if !reduced.is_empty() {
            out.insert("details".into(), Value::Object(reduced));
        }
    }

    out
}

fn pick(source: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|&f| source.get(f).map(|v| (f.to_string(), v.clone())))
        .collect()
}

fn char_len(value: &Value) -> usize {
    value.to_string().chars().count()
}
