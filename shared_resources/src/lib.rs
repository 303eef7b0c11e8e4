pub mod config;
pub mod destination;
pub mod direction;
pub mod elevator_class;
pub mod error;
pub mod request;

pub use error::{Result, SimulatorError};
