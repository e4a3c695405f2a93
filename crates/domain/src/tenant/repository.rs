use super::Tenant;
use crate::error::Result;
use async_trait::async_trait;

/// Find-or-create access to tenants, keyed by the externally-assigned frigate id.
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>>;

    /// Insert a tenant, tolerating a unique-constraint race by falling back to a read.
    async fn find_or_create(&self, id: &str) -> Result<Tenant>;
}
