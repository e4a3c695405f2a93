//! Application layer - Use cases and business workflows

pub mod bus;
pub mod handlers;
pub mod resolver;

pub use bus::{
    run_worker_pool, BusReceivers, EventBus, InFlightTracker, DEFAULT_BUS_CAPACITY,
    DEFAULT_WORKER_CONCURRENCY,
};
pub use handlers::{handle_availability, handle_event, handle_review};
pub use resolver::Resolver;
