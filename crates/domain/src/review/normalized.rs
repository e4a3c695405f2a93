use super::Severity;
use crate::coerce::to_bool;
use crate::topic;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of [`normalize_review`]: a typed, validated review ready for the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedReview {
    pub frigate_id: String,
    pub review_id: String,
    pub camera: String,
    pub severity: Severity,
    pub retracted: bool,
    /// Seconds since epoch, possibly fractional.
    pub timestamp: Option<f64>,
    pub raw: Value,
}

/// Some Frigate versions wrap the review body in `{before, after}`. When present, fields
/// are looked up preferring `after`, then `before`, then the un-wrapped top level.
fn field<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload
        .get("after")
        .and_then(|v| v.get(key))
        .or_else(|| payload.get("before").and_then(|v| v.get(key)))
        .or_else(|| payload.get(key))
}

/// Convert a decoded Frigate `frigate/reviews/#` payload into a [`NormalizedReview`].
///
/// Returns `None` when `id` or `severity` is missing, or `severity` is not one of
/// `alert`/`detection`/`review` (§3.3 invariant 4). Pure.
pub fn normalize_review(payload: &Value, mqtt_topic: &str) -> Option<NormalizedReview> {
    let parsed_topic = topic::parse(mqtt_topic)?;

    let review_id = field(payload, "id").and_then(Value::as_str)?.to_string();
    let severity = field(payload, "severity")
        .and_then(Value::as_str)
        .and_then(Severity::parse)?;

    let camera = if parsed_topic.camera != "unknown" {
        parsed_topic.camera
    } else {
        field(payload, "camera")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| "unknown".to_string())
    };

    let retracted = to_bool(field(payload, "retracted"));

    let timestamp = field(payload, "timestamp").and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });

    Some(NormalizedReview {
        frigate_id: parsed_topic.frigate_id,
        review_id,
        camera,
        severity,
        retracted,
        timestamp,
        raw: payload.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn review_persistence_scenario_s5() {
        let payload = json!({
            "id": "r1", "camera": "door", "severity": "alert",
            "retracted": false, "timestamp": 1700000100
        });
        let n = normalize_review(&payload, "frigate/reviews/door").unwrap();
        assert_eq!(n.frigate_id, "default");
        assert_eq!(n.review_id, "r1");
        assert_eq!(n.camera, "door");
        assert_eq!(n.severity, Severity::Alert);
        assert!(!n.retracted);
        assert_eq!(n.timestamp, Some(1700000100.0));
    }

    #[test]
    fn missing_id_is_dropped() {
        let payload = json!({"severity": "alert"});
        assert!(normalize_review(&payload, "frigate/reviews/door").is_none());
    }

    #[test]
    fn invalid_severity_is_dropped() {
        let payload = json!({"id": "r2", "severity": "urgent"});
        assert!(normalize_review(&payload, "frigate/reviews/door").is_none());
    }

    #[test]
    fn before_after_wrapped_variant_unwraps() {
        let payload = json!({
            "before": {"id": "r3", "severity": "detection", "camera": "door"},
            "after": {"id": "r3", "severity": "detection", "camera": "door", "retracted": true}
        });
        let n = normalize_review(&payload, "frigate/reviews/door").unwrap();
        assert_eq!(n.review_id, "r3");
        assert_eq!(n.severity, Severity::Detection);
        assert!(n.retracted);
    }
}
