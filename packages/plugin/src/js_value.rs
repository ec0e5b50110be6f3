//! JavaScript views of parsed JSON values
//!
//! Emitted modules are evaluated by a JavaScript engine, so numbers and object keys
//! are rendered the way `JSON.stringify` would render the value `JSON.parse` produced.

use serde_json::{Map, Number, Value};

/// Largest integer a JavaScript number represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Format a JSON number like JavaScript's `Number.prototype.toString`.
///
/// Integers past 2^53 are rounded through `f64` like a JS double would be.
pub fn format_number(number: &Number) -> String {
    if let Some(value) = number.as_u64() {
        if value <= MAX_SAFE_INTEGER {
            return value.to_string();
        }
    }
    if let Some(value) = number.as_i64() {
        if value.unsigned_abs() <= MAX_SAFE_INTEGER {
            return value.to_string();
        }
    }
    match number.as_f64() {
        Some(value) => format_f64(value),
        None => number.to_string(),
    }
}

/// Format a double like JavaScript's `Number.prototype.toString`.
pub fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // -0 prints as "0" in JS.
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Whether `value` is JavaScript negative zero.
pub fn is_negative_zero(number: &Number) -> bool {
    number
        .as_f64()
        .is_some_and(|value| value == 0.0 && value.is_sign_negative())
}

/// Parse `key` as a canonical array index (`0`..=`2^32 - 2`).
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

/// Object entries in JavaScript own-property order: array indices ascending, then
/// the remaining keys in insertion order.
pub fn property_order(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut indexed = Vec::new();
    let mut named = Vec::with_capacity(map.len());

    for (key, value) in map {
        match array_index(key) {
            Some(index) => indexed.push((index, key, value)),
            None => named.push((key, value)),
        }
    }

    indexed.sort_by_key(|(index, _, _)| *index);
    indexed
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .chain(named)
        .collect()
}

/// Quote `text` as a JSON string literal (`JSON.stringify` on a string).
pub fn quote(text: &str) -> String {
    Value::String(text.to_owned()).to_string()
}

/// Compact JSON text for `value`, equivalent to `JSON.stringify(JSON.parse(text))`.
pub fn minify(value: &Value) -> String {
    let mut out = String::new();
    write_minified(&mut out, value);
    out
}

fn write_minified(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Number(number) => out.push_str(&format_number(number)),
        Value::String(text) => out.push_str(&quote(text)),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_minified(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in property_order(map).into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&quote(key));
                out.push(':');
                write_minified(out, item);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_format_numbers_like_javascript() {
        assert_eq!(format_f64(1.0), "1");
        assert_eq!(format_f64(0.1), "0.1");
        assert_eq!(format_f64(-0.0), "0");
        assert_eq!(format_f64(1e21), "1e+21");
        assert_eq!(format_f64(1.5e-7), "1.5e-7");
        assert_eq!(format_f64(123456789.25), "123456789.25");
    }

    #[test]
    fn should_round_unsafe_integers_through_doubles() {
        let parsed: Value = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(minify(&parsed), "9007199254740992");
    }

    #[test]
    fn should_put_array_indices_first() {
        let parsed: Value = serde_json::from_str(r#"{"b":1,"10":2,"a":3,"2":4,"01":5}"#).unwrap();
        assert_eq!(minify(&parsed), r#"{"2":4,"10":2,"b":1,"a":3,"01":5}"#);
    }

    #[test]
    fn should_minify_nested_values() {
        let value = json!({ "a": [1, 2.5, null, true], "s": "x\ny" });
        assert_eq!(minify(&value), r#"{"a":[1,2.5,null,true],"s":"x\ny"}"#);
    }
}
