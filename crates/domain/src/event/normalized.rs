use super::EventType;
use crate::coerce::{get_str_opt, to_bool, to_number};
use crate::topic;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of [`normalize_event`]: a typed, validated event ready for the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedEvent {
    pub frigate_id: String,
    pub event_id: String,
    pub camera: String,
    pub event_type: EventType,
    pub label: String,
    pub has_snapshot: bool,
    pub has_clip: bool,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub raw: Value,
}

/// Convert a decoded Frigate `frigate/events/#` payload into a [`NormalizedEvent`].
///
/// Returns `None` when `type` is missing or not one of `new`/`update`/`end` (§3.3 invariant 3).
/// Pure: no I/O, no clock reads, no global state.
pub fn normalize_event(payload: &Value, mqtt_topic: &str) -> Option<NormalizedEvent> {
    let parsed_topic = topic::parse(mqtt_topic)?;

    let event_type = payload.get("type").and_then(Value::as_str).and_then(EventType::parse)?;

    let before = payload.get("before");
    let after = payload.get("after");

    let camera = if parsed_topic.camera != "unknown" {
        parsed_topic.camera
    } else {
        get_str_opt(payload, "camera")
            .or_else(|| after.and_then(|a| get_str_opt(a, "camera")))
            .or_else(|| before.and_then(|b| get_str_opt(b, "camera")))
            .unwrap_or_else(|| "unknown".to_string())
    };

    let event_id = get_str_opt(payload, "id")
        .or_else(|| after.and_then(|a| get_str_opt(a, "id")))
        .or_else(|| before.and_then(|b| get_str_opt(b, "id")))
        .unwrap_or_else(|| "unknown".to_string());

    let label = get_str_opt(payload, "label")
        .or_else(|| after.and_then(|a| get_str_opt(a, "label")))
        .or_else(|| before.and_then(|b| get_str_opt(b, "label")))
        .unwrap_or_else(|| "unknown".to_string());

    let has_snapshot = to_bool(payload.get("snapshot"))
        || after.is_some_and(|a| to_bool(a.get("snapshot")))
        || before.is_some_and(|b| to_bool(b.get("snapshot")));

    let has_clip = to_bool(payload.get("clip"))
        || after.is_some_and(|a| to_bool(a.get("clip")))
        || before.is_some_and(|b| to_bool(b.get("clip")));

    let start_time = to_number(payload.get("start_time"));
    let end_time = to_number(payload.get("end_time"));

    Some(NormalizedEvent {
        frigate_id: parsed_topic.frigate_id,
        event_id,
        camera,
        event_type,
        label,
        has_snapshot,
        has_clip,
        start_time,
        end_time,
        raw: payload.clone(),
    })
}
