use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-facing annotation level attached to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Alert,
    Detection,
    Review,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "alert" => Some(Self::Alert),
            "detection" => Some(Self::Detection),
            "review" => Some(Self::Review),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Detection => "detection",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted human review/alert. `(tenant_id, review_id)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub tenant_id: String,
    pub camera_id: String,
    pub review_id: String,
    pub camera_name: String,
    pub severity: Severity,
    pub retracted: bool,
    pub timestamp: Option<DateTime<Utc>>,
    pub raw_payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
