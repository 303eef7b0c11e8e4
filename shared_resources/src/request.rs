use crate::direction::Direction;
use crate::elevator_class::ElevatorClass;
use crate::error::{Result, SimulatorError};

/// A transport request: move `capacity` passengers (or weight units) from one
/// floor to another. Never mutated after creation; the amount that actually
/// boards is returned by scheduling instead.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub source_floor: u8,
    pub destination_floor: u8,
    pub capacity: u32,
    pub class: ElevatorClass,
}

impl Request {
    pub fn new(
        source_floor: u8,
        destination_floor: u8,
        capacity: u32,
        class: ElevatorClass,
    ) -> Result<Self> {
        let request = Request {
            source_floor,
            destination_floor,
            capacity,
            class,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn passenger(source_floor: u8, destination_floor: u8, passengers: u32) -> Result<Self> {
        Self::new(source_floor, destination_floor, passengers, ElevatorClass::Passenger)
    }

    pub fn freight(source_floor: u8, destination_floor: u8, weight: u32) -> Result<Self> {
        Self::new(source_floor, destination_floor, weight, ElevatorClass::Freight)
    }

    /// Checks the parts of a request that do not depend on the building.
    /// Requests deserialized from configuration bypass `new`, so the fleet calls
    /// this again before dispatching.
    pub fn validate(&self) -> Result<()> {
        if self.source_floor == self.destination_floor {
            return Err(SimulatorError::InvalidRequest(format!(
                "source and destination are both floor {}",
                self.source_floor
            )));
        }
        if self.capacity == 0 {
            return Err(SimulatorError::InvalidRequest(String::from(
                "requested capacity must be at least 1",
            )));
        }
        Ok(())
    }

    pub fn direction(&self) -> Direction {
        Direction::between(self.source_floor, self.destination_floor)
    }
}
