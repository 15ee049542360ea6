//! End-to-end reduction scenarios over report-shaped JSON.

use lh_contextpack::bound::DENIED_KEYS;
use lh_contextpack::{bound, chunk, parse_report, ReportReducer};
use serde_json::{json, Value};

fn realistic_report() -> Value {
    let items: Vec<Value> = (0..250)
        .map(|i| {
            json!({
                "url": format!("https://cdn.example.com/assets/chunk-{i}.js"),
                "totalBytes": 10_000 + i,
                "wastedBytes": 4_000 + i,
            })
        })
        .collect();

    json!({
        "lighthouseVersion": "11.4.0",
        "requestedUrl": "https://example.com/",
        "finalUrl": "https://example.com/",
        "fetchTime": "2024-03-01T10:00:00.000Z",
        "userAgent": "Mozilla/5.0 HeadlessChrome/121.0",
        "runWarnings": ["The page loaded too slowly"],
        "i18n": {"rendererFormattedStrings": {"calculatorLink": "See calculator."}},
        "configSettings": {
            "emulatedFormFactor": "mobile",
            "locale": "en-US",
            "onlyCategories": null,
            "throttlingMethod": "simulate"
        },
        "timing": {"total": 12345.6},
        "categories": {
            "performance": {
                "id": "performance",
                "title": "Performance",
                "score": 0.45,
                "auditRefs": [{"id": "unused-javascript", "weight": 0}]
            },
            "accessibility": {
                "id": "accessibility",
                "title": "Accessibility",
                "score": 0.87,
                "description": "These checks highlight opportunities to improve accessibility."
            }
        },
        "audits": {
            "unused-javascript": {
                "id": "unused-javascript",
                "title": "Reduce unused JavaScript",
                "description": "Reduce unused JavaScript and defer loading scripts.",
                "score": 0.12,
                "scoreDisplayMode": "metricSavings",
                "displayValue": "Potential savings of 1,050 KiB",
                "numericValue": 2_250,
                "numericUnit": "millisecond",
                "warnings": [],
                "details": {
                    "type": "opportunity",
                    "headings": [{"key": "url"}],
                    "items": items,
                    "overallSavingsMs": 2_250,
                    "debugData": {"type": "debugdata"}
                }
            },
            "final-screenshot": {
                "id": "final-screenshot",
                "title": "Final Screenshot",
                "score": null,
                "scoreDisplayMode": "informative",
                "details": {
                    "type": "screenshot",
                    "data": format!("data:image/jpeg;base64,{}", "A".repeat(40_000))
                }
            },
            "full-page-screenshot": {
                "id": "full-page-screenshot",
                "details": {"screenshot": {"data": "B".repeat(10_000)}}
            },
            "image-alt": {
                "id": "image-alt",
                "title": "Image elements have `[alt]` attributes",
                "score": 0,
                "details": {"type": "table", "items": [{"node": {"snippet": "<img>"}}]}
            }
        }
    })
}

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn contains_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| contains_key(v, key)),
        Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
        _ => false,
    }
}

#[test]
fn minimal_report_reduces_to_categories_only() {
    let report = json!({
        "lighthouseVersion": "11.0",
        "categories": {
            "performance": {"id": "performance", "title": "Performance", "score": 0.45}
        },
        "audits": {}
    });
    let reduced = ReportReducer::default().reduce(&report);
    // A null description is dropped by bounding, and an empty audits map
    // adds nothing.
    assert_eq!(
        reduced.as_value(),
        &json!({
            "categories": {
                "performance": {"id": "performance", "title": "Performance", "score": 0.45}
            }
        })
    );
}

#[test]
fn items_replaced_by_count_everywhere() {
    let report = realistic_report();
    let reduced = ReportReducer::default().reduce(&report);
    let audits = &reduced.as_value()["audits"];

    assert_eq!(audits["unused-javascript"]["details"]["itemsCount"], 250);
    assert_eq!(audits["image-alt"]["details"]["itemsCount"], 1);
    assert!(!contains_key(reduced.as_value(), "items"));
}

#[test]
fn only_allow_listed_fields_survive() {
    let reduced = ReportReducer::default().reduce(&realistic_report());
    let tree = reduced.as_value();

    assert_eq!(
        keys(tree),
        vec![
            "finalUrl",
            "requestedUrl",
            "fetchTime",
            "userAgent",
            "timing",
            "configSettings",
            "categories",
            "audits"
        ]
    );
    assert_eq!(
        keys(&tree["configSettings"]),
        vec!["emulatedFormFactor", "locale"]
    );
    assert_eq!(
        keys(&tree["audits"]["unused-javascript"]),
        vec![
            "score",
            "title",
            "description",
            "scoreDisplayMode",
            "displayValue",
            "numericValue",
            "numericUnit",
            "details"
        ]
    );
    assert_eq!(
        keys(&tree["audits"]["unused-javascript"]["details"]),
        vec!["type", "itemsCount"]
    );
}

#[test]
fn denied_audit_ids_are_dropped() {
    let reduced = ReportReducer::default().reduce(&realistic_report());
    for key in DENIED_KEYS {
        assert!(!contains_key(reduced.as_value(), key), "{key} survived");
    }
}

#[test]
fn reduced_report_is_already_bounded() {
    let reducer = ReportReducer::new(500);
    let reduced = reducer.reduce(&realistic_report());
    let again = bound(reduced.as_value().clone(), 500);
    assert_eq!(&again, reduced.as_value());
}

#[test]
fn reduction_shrinks_a_real_report() {
    let (reduced, stats) = ReportReducer::default().reduce_with_report(&realistic_report());
    assert!(stats.reduced_chars * 10 < stats.raw_chars);
    assert_eq!(stats.items_elided, 251);
    assert!(stats.reduced_chars <= reduced.to_text().chars().count());
}

#[test]
fn validated_report_chunks_back_to_its_text() {
    let text = realistic_report().to_string();
    let validated = parse_report(&text).unwrap();
    assert_eq!(validated.available, vec!["performance", "accessibility"]);

    let reduced = ReportReducer::default().reduce(&validated.report);
    let serialized = reduced.to_text();
    let chunks = chunk(&serialized, 300);
    assert!(chunks.len() > 1);
    assert_eq!(chunks.concat(), serialized);
}
