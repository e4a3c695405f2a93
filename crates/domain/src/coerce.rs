//! Defensive extraction helpers over untyped JSON, shared by all normalizers.
//!
//! These preserve the exact truthiness rules the ingestor is specified against:
//! any non-empty, non-falsy string counts as `true` (a snapshot filename is truthy).

use serde_json::Value;

/// Read a string field, defaulting to `default` when missing or of the wrong type.
pub fn get_str<'a>(obj: &'a Value, key: &str, default: &'a str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| default.to_owned())
}

/// Read an optional string field (no default; absent or non-string yields `None`).
pub fn get_str_opt(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Numeric fields accept both JSON numbers and numeric strings; unparseable -> `None`.
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Boolean coercion: native bools, the integer `1`, and a set of truthy/falsy strings.
/// Any other non-empty string is also truthy (e.g. a snapshot path).
pub fn to_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => {
            let lower = s.to_lowercase();
            match lower.as_str() {
                "true" | "1" | "yes" | "y" => true,
                "false" | "0" | "no" | "n" | "" => false,
                _ => !s.is_empty(),
            }
        }
        _ => false,
    }
}

/// Parse a bare-string availability body (`online`, `offline`, `true`, `1`, ...) into a bool.
/// Mirrors `to_bool` on a string value so the same truthy-string rule applies.
pub fn bare_string_to_bool(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    match lower.as_str() {
        "online" | "true" | "1" | "yes" | "y" => true,
        "offline" | "false" | "0" | "no" | "n" | "" => false,
        _ => !lower.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_string_parses() {
        assert_eq!(to_number(Some(&json!("1700000000"))), Some(1700000000.0));
        assert_eq!(to_number(Some(&json!("nonsense"))), None);
        assert_eq!(to_number(None), None);
    }

    #[test]
    fn bool_snapshot_path_is_truthy() {
        assert!(to_bool(Some(&json!("/path/to.jpg"))));
        assert!(!to_bool(Some(&json!(""))));
        assert!(to_bool(Some(&json!(1))));
        assert!(!to_bool(Some(&json!(0))));
        assert!(to_bool(Some(&json!("yes"))));
        assert!(!to_bool(Some(&json!("no"))));
    }

    #[test]
    fn bare_string_rules() {
        assert!(bare_string_to_bool("online"));
        assert!(!bare_string_to_bool("offline"));
        assert!(bare_string_to_bool("maybe"));
        assert!(!bare_string_to_bool(""));
    }
}
