mod entity;
mod normalized;
mod repository;

pub use entity::{Event, EventType};
pub use normalized::{normalize_event, NormalizedEvent};
pub use repository::EventRepository;
