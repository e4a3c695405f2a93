use super::{Event, NormalizedEvent};
use crate::error::Result;
use async_trait::async_trait;

/// Idempotent persistence for events, keyed on `(tenant_id, frigate_event_id)`.
///
/// Implementations must run the insert-or-update as a single upsert so that replaying the
/// same broker message never produces a second row (§3.3 invariant 2, §8.2 property 6), and
/// must never overwrite a non-null `start_time`/`end_time` with null on conflict (§8.2
/// property 7).
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn upsert(
        &self,
        tenant_id: &str,
        camera_id: &str,
        normalized: &NormalizedEvent,
    ) -> Result<Event>;
}
