use serde_json::Value;

/// Coerce an untrusted JSON value into a non-negative finite number.
///
/// | input                                   | result            |
/// |-----------------------------------------|-------------------|
/// | JSON number                             | its value         |
/// | string holding a decimal/exponent number (surrounding whitespace ignored) | parsed value |
/// | empty or non-numeric string             | `0`               |
/// | `null`, missing, bool, array, object    | `0`               |
/// | NaN, ±Infinity (from any source)        | `0`               |
/// | negative result                         | `0`               |
///
/// Never fails.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_numeric_str(s),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() && n > 0.0 => n,
        _ => 0.0,
    }
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // f64::from_str also accepts "inf" and "NaN"; those are filtered by the caller
    trimmed.parse::<f64>().ok()
}
