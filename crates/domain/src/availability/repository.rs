use super::{AvailabilityLog, NormalizedAvailable};
use crate::error::Result;
use async_trait::async_trait;

/// Append-only insert for availability pings. No conflict key — every call is a new row.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn insert(
        &self,
        tenant_id: &str,
        normalized: &NormalizedAvailable,
    ) -> Result<AvailabilityLog>;
}
