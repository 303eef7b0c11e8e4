pub mod assigner;
pub mod debug;
pub mod fleet;

pub use fleet::{Assignment, Fleet, FleetHandle};
