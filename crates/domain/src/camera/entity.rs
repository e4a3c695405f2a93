use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logical camera within a tenant, identified by its Frigate-side name (`key`).
///
/// `(tenant_id, key)` is unique; `id` is a store-generated surrogate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Camera {
    pub id: String,
    pub tenant_id: String,
    pub key: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
}
