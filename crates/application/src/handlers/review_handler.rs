use crate::resolver::Resolver;
use domain::{IngestError, NormalizedReview, Review, ReviewRepository};
use std::sync::Arc;
use tracing::warn;

/// Resolve the camera and idempotently upsert a review (§4.5 `handleReview`).
pub async fn handle_review(
    resolver: &Resolver,
    reviews: &Arc<dyn ReviewRepository>,
    normalized: NormalizedReview,
) -> Result<Review, IngestError> {
    let camera = match resolver
        .resolve_camera(&normalized.frigate_id, &normalized.camera)
        .await
    {
        Ok(c) => c,
        Err(e) => {
            warn!(
                frigate_id = %normalized.frigate_id,
                camera = %normalized.camera,
                review_id = %normalized.review_id,
                error_kind = e.kind(),
                "failed to resolve camera for review"
            );
            return Err(e);
        }
    };

    reviews
        .upsert(&camera.tenant_id, &camera.id, &normalized)
        .await
        .inspect_err(|e| {
            warn!(
                frigate_id = %normalized.frigate_id,
                camera = %normalized.camera,
                review_id = %normalized.review_id,
                error_kind = e.kind(),
                "failed to persist review"
            );
        })
}
