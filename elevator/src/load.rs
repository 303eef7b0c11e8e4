/// ----- LOAD MODULE -----
/// What an elevator carries and how much of it fits. Passenger cars count
/// people and freight cars count kilograms; everything else about an elevator
/// is shared and only talks to the `Loading` trait.

use std::fmt::Debug;

use shared_resources::elevator_class::ElevatorClass;
use shared_resources::error::{Result, SimulatorError};

use crate::elevator_status::Behaviour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingOption {
    Add,
    Remove,
}

pub trait Loading: Debug + Send {
    fn class(&self) -> ElevatorClass;

    fn current_load(&self) -> u32;

    fn maximum_capacity(&self) -> u32;

    fn remaining_capacity(&self) -> u32 {
        self.maximum_capacity() - self.current_load()
    }

    fn is_fully_loaded(&self) -> bool {
        self.current_load() == self.maximum_capacity()
    }

    fn modify_loading(&mut self, amount: u32, option: LoadingOption) -> Result<()>;

    fn status_text(&self, label: &str, behaviour: Behaviour, floor: u8) -> String;
}

/// Applies `amount` to `current` without leaving `[0, maximum]`.
fn apply(current: u32, maximum: u32, amount: u32, option: LoadingOption) -> Result<u32> {
    match option {
        LoadingOption::Add => {
            let remaining = maximum - current;
            if amount > remaining {
                return Err(SimulatorError::CapacityExceeded { requested: amount, remaining });
            }
            Ok(current + amount)
        }
        LoadingOption::Remove => current
            .checked_sub(amount)
            .ok_or(SimulatorError::LoadUnderflow { requested: amount, current }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerLoad {
    passengers: u32,
    maximum_passengers: u32,
}

impl PassengerLoad {
    pub fn new(maximum_passengers: u32) -> Self {
        PassengerLoad { passengers: 0, maximum_passengers }
    }
}

impl Loading for PassengerLoad {
    fn class(&self) -> ElevatorClass {
        ElevatorClass::Passenger
    }

    fn current_load(&self) -> u32 {
        self.passengers
    }

    fn maximum_capacity(&self) -> u32 {
        self.maximum_passengers
    }

    fn modify_loading(&mut self, amount: u32, option: LoadingOption) -> Result<()> {
        self.passengers = apply(self.passengers, self.maximum_passengers, amount, option)?;
        Ok(())
    }

    fn status_text(&self, label: &str, behaviour: Behaviour, floor: u8) -> String {
        format!(
            "Elevator {} is {} at Floor {} carrying {} passengers",
            label, behaviour, floor, self.passengers
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreightLoad {
    weight: u32,
    maximum_weight: u32,
}

impl FreightLoad {
    pub fn new(maximum_weight: u32) -> Self {
        FreightLoad { weight: 0, maximum_weight }
    }
}

impl Loading for FreightLoad {
    fn class(&self) -> ElevatorClass {
        ElevatorClass::Freight
    }

    fn current_load(&self) -> u32 {
        self.weight
    }

    fn maximum_capacity(&self) -> u32 {
        self.maximum_weight
    }

    fn modify_loading(&mut self, amount: u32, option: LoadingOption) -> Result<()> {
        self.weight = apply(self.weight, self.maximum_weight, amount, option)?;
        Ok(())
    }

    fn status_text(&self, label: &str, behaviour: Behaviour, floor: u8) -> String {
        format!(
            "Elevator {} is {} at Floor {} carrying {} kg of freight",
            label, behaviour, floor, self.weight
        )
    }
}

pub fn for_class(class: ElevatorClass, capacity: u32) -> Box<dyn Loading> {
    match class {
        ElevatorClass::Passenger => Box::new(PassengerLoad::new(capacity)),
        ElevatorClass::Freight => Box::new(FreightLoad::new(capacity)),
    }
}
