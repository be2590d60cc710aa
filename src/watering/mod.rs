pub mod controller;
pub mod poller;

pub use controller::{should_auto_water, WateringController};
pub use poller::run_standalone;
