use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An append-only online/offline ping for a Frigate instance. No unique key beyond `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityLog {
    pub id: String,
    pub tenant_id: String,
    pub available: bool,
    pub timestamp: DateTime<Utc>,
    pub raw_payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
