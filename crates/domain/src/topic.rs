//! MQTT topic parsing for the three Frigate filters this system subscribes to.

/// The three broker-side wildcard filters the subscriber registers.
pub const EVENTS_FILTER: &str = "frigate/events/#";
pub const REVIEWS_FILTER: &str = "frigate/reviews/#";
pub const AVAILABLE_FILTER: &str = "frigate/available/#";

/// Which of the three Frigate message kinds a topic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKind {
    Event,
    Review,
    Available,
}

/// A topic decomposed into the pieces the resolver and normalizers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTopic {
    pub kind: TopicKind,
    pub frigate_id: String,
    /// Camera name from the topic path, if present (`"unknown"` otherwise).
    pub camera: String,
}

/// Match a topic against the three subscribed filters and decompose it.
///
/// Topic shape: `frigate[/<frigate_id>]/{events|reviews|available}[/<camera>]`.
/// When the second segment is itself one of `events`/`reviews`/`available`, there is no
/// embedded frigate id and it defaults to `"default"`.
pub fn parse(topic: &str) -> Option<ParsedTopic> {
    let segments: Vec<&str> = topic.split('/').filter(|s| !s.is_empty()).collect();
    if segments.first() != Some(&"frigate") {
        return None;
    }

    let is_kind = |s: &str| matches!(s, "events" | "reviews" | "available");

    let (frigate_id, kind_idx) = match segments.get(1) {
        Some(s) if is_kind(s) => ("default".to_string(), 1),
        Some(s) => (s.to_string(), 2),
        None => return None,
    };

    let kind_segment = segments.get(kind_idx)?;
    let kind = match *kind_segment {
        "events" => TopicKind::Event,
        "reviews" => TopicKind::Review,
        "available" => TopicKind::Available,
        _ => return None,
    };

    let camera = segments
        .get(kind_idx + 1)
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Some(ParsedTopic {
        kind,
        frigate_id,
        camera,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_instance_no_embedded_id() {
        let parsed = parse("frigate/events/front_door").unwrap();
        assert_eq!(parsed.frigate_id, "default");
        assert_eq!(parsed.camera, "front_door");
        assert_eq!(parsed.kind, TopicKind::Event);
    }

    #[test]
    fn embedded_frigate_id() {
        let parsed = parse("frigate/acme/events/door").unwrap();
        assert_eq!(parsed.frigate_id, "acme");
        assert_eq!(parsed.camera, "door");
    }

    #[test]
    fn camera_absent_defaults_unknown() {
        let parsed = parse("frigate/events").unwrap();
        assert_eq!(parsed.camera, "unknown");
    }

    #[test]
    fn non_frigate_prefix_rejected() {
        assert!(parse("other/events/door").is_none());
    }

    #[test]
    fn availability_topic() {
        let parsed = parse("frigate/siteA/available").unwrap();
        assert_eq!(parsed.kind, TopicKind::Available);
        assert_eq!(parsed.frigate_id, "siteA");
    }
}
