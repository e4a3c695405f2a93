use domain::{Camera, CameraRepository, IngestError, Tenant, TenantRepository};
use std::sync::Arc;
use tracing::debug;

/// Maps `(frigate_id, camera_name)` to `(tenant_id, camera_id)`, auto-provisioning both rows
/// the first time they are seen (§4.3).
pub struct Resolver {
    tenants: Arc<dyn TenantRepository>,
    cameras: Arc<dyn CameraRepository>,
}

impl Resolver {
    pub fn new(tenants: Arc<dyn TenantRepository>, cameras: Arc<dyn CameraRepository>) -> Self {
        Self { tenants, cameras }
    }

    pub async fn resolve_tenant(&self, frigate_id: &str) -> Result<Tenant, IngestError> {
        let tenant = self
            .tenants
            .find_or_create(frigate_id)
            .await
            .map_err(|e| IngestError::TenantResolutionFailed(e.to_string()))?;
        debug!(tenant_id = %tenant.id, "resolved tenant");
        Ok(tenant)
    }

    pub async fn resolve_camera(
        &self,
        frigate_id: &str,
        camera_name: &str,
    ) -> Result<Camera, IngestError> {
        let tenant = self.resolve_tenant(frigate_id).await?;
        let camera = self
            .cameras
            .find_or_create(&tenant.id, camera_name)
            .await
            .map_err(|e| IngestError::CameraResolutionFailed(e.to_string()))?;
        debug!(tenant_id = %tenant.id, camera_id = %camera.id, key = %camera.key, "resolved camera");
        Ok(camera)
    }
}
