use super::Camera;
use crate::error::Result;
use async_trait::async_trait;

/// Find-or-create access to cameras, keyed by `(tenant_id, key)`.
#[async_trait]
pub trait CameraRepository: Send + Sync {
    async fn find_by_tenant_and_key(
        &self,
        tenant_id: &str,
        key: &str,
    ) -> Result<Option<Camera>>;

    /// Insert a camera (label defaults to `key`), tolerating a unique-constraint race.
    async fn find_or_create(&self, tenant_id: &str, key: &str) -> Result<Camera>;

    /// Re-read a camera by id inside the caller's transaction context, to guard against
    /// cross-tenant races between resolution and the persistence transaction.
    async fn find_by_id(&self, id: &str) -> Result<Option<Camera>>;
}
