mod entity;
mod repository;

pub use entity::Tenant;
pub use repository::TenantRepository;
