//! Domain layer - pure business logic with no external dependencies.
//!
//! This crate contains:
//! - Entities (Tenant, Camera, Event, Review, AvailabilityLog)
//! - Normalized in-flight records and the pure normalizer functions that produce them
//! - Repository interfaces (traits) implemented by the infrastructure crate
//! - The domain error taxonomy
//!
//! Principles:
//! - No dependencies on infrastructure (no network, no SQL, no MQTT)
//! - Normalizers are referentially transparent except for the explicit clock argument
//! - Testable in isolation

pub mod availability;
pub mod camera;
pub mod coerce;
pub mod error;
pub mod event;
pub mod review;
pub mod tenant;
pub mod topic;

pub use availability::{normalize_available, AvailabilityLog, AvailabilityRepository, NormalizedAvailable};
pub use camera::{Camera, CameraRepository};
pub use error::IngestError;
pub use event::{normalize_event, Event, EventRepository, EventType, NormalizedEvent};
pub use review::{normalize_review, NormalizedReview, Review, ReviewRepository, Severity};
pub use tenant::{Tenant, TenantRepository};

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A normalized record of any of the three kinds, as produced by [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Event(NormalizedEvent),
    Review(NormalizedReview),
    Available(NormalizedAvailable),
}

/// Route a decoded payload to the matching normalizer by topic prefix (§6.2).
///
/// Returns `None` when the topic matches none of the three subscribed filters, or when the
/// matching normalizer itself rejects the payload.
pub fn normalize(payload: &Value, mqtt_topic: &str, now: DateTime<Utc>) -> Option<Normalized> {
    let parsed = topic::parse(mqtt_topic)?;
    match parsed.kind {
        topic::TopicKind::Event => normalize_event(payload, mqtt_topic).map(Normalized::Event),
        topic::TopicKind::Review => normalize_review(payload, mqtt_topic).map(Normalized::Review),
        topic::TopicKind::Available => {
            normalize_available(payload, mqtt_topic, now).map(Normalized::Available)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn router_dispatches_to_event_normalizer() {
        let payload = json!({"type": "new", "before": {"id": "e1"}, "after": {"id": "e1"}});
        let direct = normalize_event(&payload, "frigate/events/door").unwrap();
        match normalize(&payload, "frigate/events/door", fixed_now()) {
            Some(Normalized::Event(n)) => assert_eq!(n, direct),
            other => panic!("expected Event, got {other:?}"),
        }
    }

    #[test]
    fn router_dispatches_to_review_normalizer() {
        let payload = json!({"id": "r1", "severity": "alert"});
        let direct = normalize_review(&payload, "frigate/reviews/door").unwrap();
        match normalize(&payload, "frigate/reviews/door", fixed_now()) {
            Some(Normalized::Review(n)) => assert_eq!(n, direct),
            other => panic!("expected Review, got {other:?}"),
        }
    }

    #[test]
    fn router_dispatches_to_availability_normalizer() {
        let payload = json!("online");
        match normalize(&payload, "frigate/available/cam", fixed_now()) {
            Some(Normalized::Available(n)) => assert!(n.available),
            other => panic!("expected Available, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_topic_returns_none() {
        assert!(normalize(&json!({}), "other/topic", fixed_now()).is_none());
    }
}
