use super::{NormalizedReview, Review};
use crate::error::Result;
use async_trait::async_trait;

/// Idempotent persistence for reviews, keyed on `(tenant_id, review_id)`.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn upsert(
        &self,
        tenant_id: &str,
        camera_id: &str,
        normalized: &NormalizedReview,
    ) -> Result<Review>;
}
