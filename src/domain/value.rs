//! Row type and coercions of dynamic cell values.
//!
//! Rows are plain JSON objects: each column reads the value stored under its key and
//! coerces it to what its type needs. Absent or mismatched values never fail; they
//! fall back to an empty string or to zero.

use serde_json::Value;
use std::collections::BTreeMap;

/// One record of the dataset, keyed by field name.
pub type Row = BTreeMap<String, Value>;

/// Returns the textual form of the value stored under `key`.
///
/// Missing keys and `null` yield an empty string. Numbers print without a trailing
/// `.0` when they are integral, arrays join their items with commas.
///
/// # Example
///
/// ```
/// use datatable::domain::value::cell_text;
/// use serde_json::json;
///
/// let row = [("qty".to_string(), json!(3.0))].into_iter().collect();
/// assert_eq!(cell_text(&row, "qty"), "3");
/// assert_eq!(cell_text(&row, "missing"), "");
/// ```
#[must_use]
pub fn cell_text(row: &Row, key: &str) -> String {
    row.get(key).map_or_else(String::new, value_text)
}

/// Returns the textual form of a single value (see [`cell_text`]).
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string()))
            .unwrap_or_else(|| number_text(n.as_f64().unwrap_or(0.0))),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Returns the numeric sort key of the value stored under `key`.
///
/// Strings are read up to the longest numeric prefix (`"12px"` is `12`). Anything
/// that yields no number at all, including `null`, booleans and missing keys,
/// becomes `0.0`. A stored `0` is therefore indistinguishable from garbage.
#[must_use]
pub fn cell_number(row: &Row, key: &str) -> f64 {
    let parsed = match row.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_float_prefix(s),
        Some(Value::Array(_)) => row.get(key).map(value_text).and_then(|s| parse_float_prefix(&s)),
        _ => None,
    };
    parsed.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

/// Parses the longest leading decimal number of `input`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional exponent,
/// and the literal `Infinity`. Returns `None` when no digits are found.
#[must_use]
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Converts a whole value to a number, or `None` if it is not numeric.
///
/// Unlike [`cell_number`] this requires the entire (trimmed) string to be numeric.
/// Empty strings and `null` count as zero.
#[must_use]
pub fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else if trimmed.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')) {
                trimmed.parse::<f64>().ok()
            } else {
                None
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Formats the value with a comma every three digits of its integer part.
///
/// The fractional part is kept unmodified. Values that are not numeric are returned
/// in their plain textual form.
///
/// # Example
///
/// ```
/// use datatable::domain::value::format_thousands;
/// use serde_json::json;
///
/// assert_eq!(format_thousands(&json!(1234567.891)), "1,234,567.891");
/// assert_eq!(format_thousands(&json!("n/a")), "n/a");
/// ```
#[must_use]
pub fn format_thousands(value: &Value) -> String {
    let Some(number) = value_number(value) else {
        return value_text(value);
    };

    let text = number_text(number);
    let (int_part, frac_part) = text.split_once('.').map_or((text.as_str(), None), |(i, f)| (i, Some(f)));
    let (sign, digits) = int_part.strip_prefix('-').map_or(("", int_part), |d| ("-", d));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}
