//! Error types for the elevator simulator.

use thiserror::Error;

/// Result type alias using the simulator error type.
pub type Result<T> = std::result::Result<T, SimulatorError>;

#[derive(Error, Debug)]
pub enum SimulatorError {
    /// Bad building or fleet settings, only raised while setting up
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown elevator: {0}")]
    UnknownElevator(String),

    /// Every elevator scored as unavailable for the request
    #[error("No elevator can serve this request")]
    NoAvailableElevator,

    #[error("No elevators in the building")]
    EmptyFleet,

    /// Loading more than the remaining capacity. Boarding is clamped before any
    /// load is added, so this means the scheduling bookkeeping is broken.
    #[error("Loading {requested} would exceed the remaining capacity of {remaining}")]
    CapacityExceeded { requested: u32, remaining: u32 },

    #[error("Unloading {requested} exceeds the current load of {current}")]
    LoadUnderflow { requested: u32, current: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
