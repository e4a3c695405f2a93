use crate::resolver::Resolver;
use domain::{Event, EventRepository, IngestError, NormalizedEvent};
use std::sync::Arc;
use tracing::warn;

/// Resolve the camera and idempotently upsert a detection event (§4.5 `handleEvent`).
///
/// The re-read-and-verify cross-tenant guard and the upsert itself happen inside a single
/// store transaction owned by the `EventRepository` implementation.
pub async fn handle_event(
    resolver: &Resolver,
    events: &Arc<dyn EventRepository>,
    normalized: NormalizedEvent,
) -> Result<Event, IngestError> {
    let camera = match resolver
        .resolve_camera(&normalized.frigate_id, &normalized.camera)
        .await
    {
        Ok(c) => c,
        Err(e) => {
            warn!(
                frigate_id = %normalized.frigate_id,
                camera = %normalized.camera,
                event_id = %normalized.event_id,
                error_kind = e.kind(),
                "failed to resolve camera for event"
            );
            return Err(e);
        }
    };

    events
        .upsert(&camera.tenant_id, &camera.id, &normalized)
        .await
        .inspect_err(|e| {
            warn!(
                frigate_id = %normalized.frigate_id,
                camera = %normalized.camera,
                event_id = %normalized.event_id,
                error_kind = e.kind(),
                "failed to persist event"
            );
        })
}
