use crate::resolver::Resolver;
use domain::{AvailabilityLog, AvailabilityRepository, IngestError, NormalizedAvailable};
use std::sync::Arc;
use tracing::warn;

/// Resolve the tenant only (no camera lookup) and insert an availability ping
/// (§4.5 `handleAvailability`).
pub async fn handle_availability(
    resolver: &Resolver,
    availability: &Arc<dyn AvailabilityRepository>,
    normalized: NormalizedAvailable,
) -> Result<AvailabilityLog, IngestError> {
    let tenant = match resolver.resolve_tenant(&normalized.frigate_id).await {
        Ok(t) => t,
        Err(e) => {
            warn!(
                frigate_id = %normalized.frigate_id,
                error_kind = e.kind(),
                "failed to resolve tenant for availability ping"
            );
            return Err(e);
        }
    };

    availability
        .insert(&tenant.id, &normalized)
        .await
        .inspect_err(|e| {
            warn!(
                frigate_id = %normalized.frigate_id,
                error_kind = e.kind(),
                "failed to persist availability ping"
            );
        })
}
