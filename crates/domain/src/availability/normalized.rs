use crate::coerce::{bare_string_to_bool, to_bool, to_number};
use crate::topic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of [`normalize_available`]: a typed availability ping ready for the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedAvailable {
    pub frigate_id: String,
    pub available: bool,
    /// Seconds since epoch. Always present: the caller's clock stamps it when the
    /// payload carries none.
    pub timestamp: f64,
    pub raw: Value,
}

/// Convert a decoded Frigate `frigate/available/#` payload into a [`NormalizedAvailable`].
///
/// Accepts either a wrapped object (`{"available": bool}` / `{"online": bool}`) or a bare
/// JSON string body (`"online"`, `"offline"`, `"1"`, ...). `now` is the caller's wall clock,
/// taken as an explicit argument so this stays pure and testable. Returns `None` only when
/// the topic itself doesn't match the subscribed shape, or the payload is a JSON type (e.g.
/// a bare number or array) that carries no coercible signal at all.
pub fn normalize_available(
    payload: &Value,
    mqtt_topic: &str,
    now: DateTime<Utc>,
) -> Option<NormalizedAvailable> {
    let parsed_topic = topic::parse(mqtt_topic)?;

    let available = match payload {
        Value::String(s) => bare_string_to_bool(s),
        Value::Object(_) => to_bool(payload.get("available").or_else(|| payload.get("online"))),
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        _ => return None,
    };

    let timestamp = payload
        .get("timestamp")
        .and_then(|_| to_number(payload.get("timestamp")))
        .unwrap_or_else(|| now.timestamp() as f64);

    Some(NormalizedAvailable {
        frigate_id: parsed_topic.frigate_id,
        available,
        timestamp,
        raw: payload.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn bare_string_online() {
        let n = normalize_available(&json!("online"), "frigate/available/cam", fixed_now()).unwrap();
        assert!(n.available);
    }

    #[test]
    fn bare_string_offline() {
        let n =
            normalize_available(&json!("offline"), "frigate/available/cam", fixed_now()).unwrap();
        assert!(!n.available);
    }

    #[test]
    fn bare_string_garbage_is_truthy() {
        let n = normalize_available(&json!("maybe"), "frigate/available/cam", fixed_now()).unwrap();
        assert!(n.available);
    }

    #[test]
    fn bare_numeric_body() {
        let on = normalize_available(&json!(1), "frigate/available/cam", fixed_now()).unwrap();
        assert!(on.available);
        let off = normalize_available(&json!(0), "frigate/available/cam", fixed_now()).unwrap();
        assert!(!off.available);
    }

    #[test]
    fn wrapped_available_field() {
        let n = normalize_available(
            &json!({"available": false}),
            "frigate/available/cam",
            fixed_now(),
        )
        .unwrap();
        assert!(!n.available);
    }

    #[test]
    fn wrapped_online_field() {
        let n = normalize_available(
            &json!({"online": true}),
            "frigate/available/cam",
            fixed_now(),
        )
        .unwrap();
        assert!(n.available);
    }

    #[test]
    fn missing_timestamp_stamps_now() {
        let n = normalize_available(&json!("online"), "frigate/available/cam", fixed_now())
            .unwrap();
        assert_eq!(n.timestamp, 1_700_000_000.0);
    }

    #[test]
    fn explicit_timestamp_preserved() {
        let n = normalize_available(
            &json!({"available": true, "timestamp": 1_699_999_999}),
            "frigate/available/cam",
            fixed_now(),
        )
        .unwrap();
        assert_eq!(n.timestamp, 1_699_999_999.0);
    }
}
