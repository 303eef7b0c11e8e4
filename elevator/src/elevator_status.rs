use std::fmt;

use shared_resources::direction::Direction;
use shared_resources::elevator_class::ElevatorClass;

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Behaviour {
    Idle,
    Moving,
    Docked,
}

impl Behaviour {
    pub fn as_string(&self) -> String {
        match self {
            Behaviour::Idle => String::from("Idle"),
            Behaviour::Moving => String::from("Moving"),
            Behaviour::Docked => String::from("Docked"),
        }
    }
}

impl fmt::Display for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Point-in-time copy of an elevator, detached from its lock. Scoring and the
/// dashboard only ever look at snapshots.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ElevatorSnapshot {
    pub label: String,
    pub class: ElevatorClass,
    pub behaviour: Behaviour,
    pub floor: u8,
    pub lowest_floor: u8,
    pub highest_floor: u8,
    pub direction: Direction,
    pub current_load: u32,
    pub maximum_capacity: u32,
    /// Capacity left once the load on board and pending pick-ups are counted.
    pub free_capacity: u32,
    pub upward_stops: usize,
    pub downward_stops: usize,
}
