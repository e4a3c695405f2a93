mod entity;
mod repository;

pub use entity::Camera;
pub use repository::CameraRepository;
