use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a Frigate detection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    New,
    Update,
    End,
}

impl EventType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "update" => Some(Self::Update),
            "end" => Some(Self::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Update => "update",
            Self::End => "end",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted detection record. `(tenant_id, frigate_event_id)` is unique.
///
/// `frigate_event_id` is Frigate's own id for the detection (`NormalizedEvent::event_id`) —
/// not to be confused with the Frigate *instance* id, which is captured one level up as the
/// tenant's id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub tenant_id: String,
    pub camera_id: String,
    pub frigate_event_id: String,
    pub event_type: EventType,
    pub label: String,
    pub has_snapshot: bool,
    pub has_clip: bool,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub raw_payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
