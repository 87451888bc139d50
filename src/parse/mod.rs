//! Numeric sequence recovery from model output
//!
//! Pure text-to-data extraction, no I/O. Two tiers: a strict
//! bracket-delimited JSON array extraction, then a loose scan for
//! standalone numeric tokens when the strict pass yields nothing.

use regex::Regex;
use serde_json::Value;

/// Extract an ordered numeric sequence from arbitrary response text
///
/// The strict strategy wins whenever it recovers at least one number,
/// regardless of length; reconciliation against `target_count` happens in
/// the predictor. Returns `None` when neither strategy recovers enough.
pub fn extract_series(text: &str, target_count: usize) -> Option<Vec<f64>> {
    if let Some(values) = extract_bracketed(text) {
        if !values.is_empty() {
            return Some(values);
        }
    }
    scan_numeric_tokens(text, target_count)
}

/// Strict strategy: parse the substring between the first `[` and the
/// last `]` as a JSON array and keep its numeric-looking elements
fn extract_bracketed(text: &str) -> Option<Vec<f64>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }

    let items: Vec<Value> = serde_json::from_str(&text[start..=end]).ok()?;
    Some(items.iter().filter_map(numeric_value).collect())
}

/// Accept non-negative numbers and unsigned integer/decimal strings;
/// no sign or exponent handling
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| *v >= 0.0),
        Value::String(s) => {
            let plain = !s.is_empty()
                && s != "."
                && s.matches('.').count() <= 1
                && s.chars().all(|c| c.is_ascii_digit() || c == '.');
            if plain {
                s.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Loose fallback: collect every standalone integer or decimal token,
/// accepted only when at least half the target count was found
fn scan_numeric_tokens(text: &str, target_count: usize) -> Option<Vec<f64>> {
    let pattern = Regex::new(r"\b\d+\.\d+\b|\b\d+\b").expect("Invalid numeric token pattern");
    let values: Vec<f64> = pattern
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    if values.is_empty() || (values.len() as f64) < target_count as f64 * 0.5 {
        return None;
    }
    Some(values)
}
