use serde_json::{Map, Value};

/// Keys dropped wherever they appear in a mapping. These hold screenshots,
/// traces and raw item lists, which dominate report size and are useless
/// as text context.
pub const DENIED_KEYS: &[&str] = &[
    "full-page-screenshot",
    "screenshot",
    "screenshots",
    "trace",
    "traces",
    "network-requests",
    "items",
];

/// Bound every string in `value` to at most `max_chars` characters.
///
/// - mappings: denied keys are dropped, values are bounded, and keys whose
///   bounded value is `null` are dropped
/// - sequences: bounded elementwise, order and length preserved
/// - strings longer than `max_chars` become `"[oversized: N chars]"`
/// - numbers, booleans and null pass through
///
/// Lengths are counted in characters, not bytes. The result is a fixed
/// point: bounding it again with the same `max_chars` changes nothing.
pub fn bound(value: Value, max_chars: usize) -> Value {
    let mut oversized = 0;
    bound_counting(value, max_chars, &mut oversized)
}

/// Like [`bound`], also counting how many strings were replaced.
pub fn bound_counting(value: Value, max_chars: usize, oversized: &mut usize) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                if DENIED_KEYS.contains(&key.as_str()) {
                    continue;
                }
                match bound_counting(child, max_chars, oversized) {
                    Value::Null => {}
                    bounded => {
                        out.insert(key, bounded);
                    }
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| bound_counting(item, max_chars, oversized))
                .collect(),
        ),
        Value::String(s) => {
            let chars = s.chars().count();
            if chars > max_chars {
                *oversized += 1;
                Value::String(oversized_marker(chars, max_chars))
            } else {
                Value::String(s)
            }
        }
        scalar => scalar,
    }
}

/// Placeholder for a string of `chars` characters. Cut to `max_chars` when
/// the bound is smaller than the marker itself.
fn oversized_marker(chars: usize, max_chars: usize) -> String {
    let marker = format!("[oversized: {chars} chars]");
    if marker.chars().count() <= max_chars {
        marker
    } else {
        marker.chars().take(max_chars).collect()
    }
}
