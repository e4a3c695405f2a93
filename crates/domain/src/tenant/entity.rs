use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The isolation unit in the schema: one row per Frigate instance.
///
/// `id` is externally assigned — it is the frigate id extracted from the MQTT topic,
/// never generated by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    /// The default name given to a tenant auto-created on first sighting.
    pub fn default_name(frigate_id: &str) -> String {
        format!("Frigate {frigate_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_includes_frigate_id() {
        assert_eq!(Tenant::default_name("acme"), "Frigate acme");
    }
}
