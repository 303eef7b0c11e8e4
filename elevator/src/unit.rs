/// ----- ELEVATOR UNIT -----
/// A single car: where it is, where it is heading, what it carries and which
/// stops it has promised. `schedule_request` takes new work from the
/// dispatcher and `tick` advances the car by one step of the state machine.
///
/// A request away from the car queues two stops under one ticket: the pick-up
/// towards the car's path to it and the drop-off in the request's own
/// direction. Until the pick-up is served the ticket is awaiting, and a car
/// docking at an awaiting drop-off holds it back instead of unloading. Pick-ups
/// and boarded drop-offs always lie at or ahead of the car in the direction of
/// their queue, so the car keeps making progress until both queues are empty.

use std::collections::HashSet;

use log::{debug, info, warn};

use shared_resources::destination::{Destination, DestinationKind, DestinationQueue};
use shared_resources::direction::Direction;
use shared_resources::elevator_class::ElevatorClass;
use shared_resources::error::{Result, SimulatorError};
use shared_resources::request::Request;

use crate::elevator_status::{Behaviour, ElevatorSnapshot};
use crate::load::{self, Loading, LoadingOption};

#[derive(Debug)]
pub struct ElevatorUnit {
    label: String,
    floor: u8,
    lowest_floor: u8,
    highest_floor: u8,
    direction: Direction,
    behaviour: Behaviour,
    upward: DestinationQueue,
    downward: DestinationQueue,
    load: Box<dyn Loading>,
    reserved: u32,
    next_ticket: u64,
    awaiting: HashSet<u64>,
    held: Vec<Destination>,
}

impl ElevatorUnit {
    pub fn new(
        label: impl Into<String>,
        class: ElevatorClass,
        lowest_floor: u8,
        highest_floor: u8,
        capacity: u32,
    ) -> Result<Self> {
        let label = label.into();
        if lowest_floor > highest_floor {
            return Err(SimulatorError::InvalidConfiguration(format!(
                "elevator {} has lowest floor {} above highest floor {}",
                label, lowest_floor, highest_floor
            )));
        }
        if capacity == 0 {
            return Err(SimulatorError::InvalidConfiguration(format!(
                "elevator {} must have a positive capacity",
                label
            )));
        }
        Ok(ElevatorUnit {
            label,
            floor: lowest_floor,
            lowest_floor,
            highest_floor,
            direction: Direction::Neutral,
            behaviour: Behaviour::Idle,
            upward: DestinationQueue::upward(),
            downward: DestinationQueue::downward(),
            load: load::for_class(class, capacity),
            reserved: 0,
            next_ticket: 0,
            awaiting: HashSet::new(),
            held: Vec::new(),
        })
    }

    /// Parks a freshly built car at `floor` instead of its lowest floor.
    pub fn starting_at(mut self, floor: u8) -> Result<Self> {
        if floor < self.lowest_floor || floor > self.highest_floor {
            return Err(SimulatorError::InvalidConfiguration(format!(
                "elevator {} cannot start at floor {} outside {}..={}",
                self.label, floor, self.lowest_floor, self.highest_floor
            )));
        }
        self.floor = floor;
        Ok(self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn class(&self) -> ElevatorClass {
        self.load.class()
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn lowest_floor(&self) -> u8 {
        self.lowest_floor
    }

    pub fn highest_floor(&self) -> u8 {
        self.highest_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn current_load(&self) -> u32 {
        self.load.current_load()
    }

    pub fn maximum_capacity(&self) -> u32 {
        self.load.maximum_capacity()
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.load.remaining_capacity()
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.load.is_fully_loaded()
    }

    /// Capacity not yet promised to anyone: what is left after the load on
    /// board and the pick-ups still waiting to be served.
    pub fn free_capacity(&self) -> u32 {
        self.remaining_capacity().saturating_sub(self.reserved)
    }

    pub fn modify_loading(&mut self, amount: u32, option: LoadingOption) -> Result<()> {
        self.load.modify_loading(amount, option)
    }

    pub fn status(&self) -> String {
        self.load.status_text(&self.label, self.behaviour, self.floor)
    }

    pub fn upward_destinations(&self) -> Vec<Destination> {
        self.upward.to_sorted_vec()
    }

    pub fn downward_destinations(&self) -> Vec<Destination> {
        self.downward.to_sorted_vec()
    }

    /// Drop-offs the car has reached before their pick-up was served.
    pub fn held_destinations(&self) -> &[Destination] {
        &self.held
    }

    pub fn has_pending_destinations(&self) -> bool {
        !self.upward.is_empty() || !self.downward.is_empty() || !self.held.is_empty()
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            label: self.label.clone(),
            class: self.class(),
            behaviour: self.behaviour,
            floor: self.floor,
            lowest_floor: self.lowest_floor,
            highest_floor: self.highest_floor,
            direction: self.direction,
            current_load: self.current_load(),
            maximum_capacity: self.maximum_capacity(),
            free_capacity: self.free_capacity(),
            upward_stops: self.upward.len(),
            downward_stops: self.downward.len(),
        }
    }

    fn queue(&self, direction: Direction) -> &DestinationQueue {
        match direction {
            Direction::Down => &self.downward,
            Direction::Up | Direction::Neutral => &self.upward,
        }
    }

    fn queue_mut(&mut self, direction: Direction) -> &mut DestinationQueue {
        match direction {
            Direction::Down => &mut self.downward,
            Direction::Up | Direction::Neutral => &mut self.upward,
        }
    }

    fn next_stop(&self, direction: Direction) -> Option<u8> {
        self.queue(direction).next_from(self.floor).map(|destination| destination.floor)
    }

    /// Direction the car has to take to reach the request's source floor, or
    /// its destination when the car is already at the source.
    pub fn default_direction(&self, request: &Request) -> Direction {
        if request.source_floor < self.floor {
            Direction::Down
        } else if request.source_floor == self.floor {
            Direction::between(self.floor, request.destination_floor)
        } else {
            Direction::Up
        }
    }

    /// Accepts as much of `request` as fits and queues the stops needed to
    /// serve it. Returns how many passengers (or kilograms) will board.
    pub fn schedule_request(&mut self, request: &Request) -> Result<u32> {
        let boarded = self.free_capacity().min(request.capacity);
        if boarded == 0 {
            warn!(
                "Elevator {} has no free capacity left, nothing boards for {:?}",
                self.label, request
            );
            return Ok(0);
        }

        let direction = self.default_direction(request);
        if self.behaviour == Behaviour::Idle {
            self.direction = direction;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let drop_off = Destination::drop_off(request.destination_floor, boarded, ticket);

        if request.source_floor != self.floor {
            let pick_up = Destination::pick_up(request.source_floor, boarded, ticket);
            self.queue_mut(direction).push(pick_up);
            self.queue_mut(request.direction()).push(drop_off);
            self.awaiting.insert(ticket);
            self.reserved += boarded;
        } else {
            self.load.modify_loading(boarded, LoadingOption::Add)?;
            self.queue_mut(direction).push(drop_off);
        }

        debug!(
            "Elevator {} scheduled {} of {} from floor {} to floor {}, heading {}",
            self.label,
            boarded,
            request.capacity,
            request.source_floor,
            request.destination_floor,
            self.direction
        );
        Ok(boarded)
    }

    /// Advances the state machine by one step.
    pub fn tick(&mut self) -> Result<()> {
        match self.behaviour {
            Behaviour::Idle => {
                if self.direction != Direction::Neutral {
                    self.advance(self.direction);
                }
            }
            Behaviour::Moving => match self.next_stop(self.direction) {
                Some(floor) if floor == self.floor => {
                    self.behaviour = Behaviour::Docked;
                    debug!("Elevator {} docked at floor {}", self.label, self.floor);
                }
                Some(_) => self.advance(self.direction),
                None => self.continue_or_rest(),
            },
            Behaviour::Docked => {
                self.serve_current_floor()?;
                self.continue_or_rest();
            }
        }
        Ok(())
    }

    fn at_boundary(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.floor >= self.highest_floor,
            Direction::Down => self.floor <= self.lowest_floor,
            Direction::Neutral => true,
        }
    }

    /// Sets the car moving in `direction` and steps one floor if the shaft allows it.
    fn advance(&mut self, direction: Direction) {
        self.behaviour = Behaviour::Moving;
        self.direction = direction;
        if self.at_boundary(direction) {
            return;
        }
        match direction {
            Direction::Up => self.floor += 1,
            Direction::Down => self.floor -= 1,
            Direction::Neutral => {}
        }
    }

    fn serve_current_floor(&mut self) -> Result<()> {
        let floor = self.floor;
        let served = self.queue_mut(self.direction).pop_floor(floor);
        for destination in served {
            match destination.kind {
                DestinationKind::DropOff if self.awaiting.contains(&destination.ticket) => {
                    debug!(
                        "Elevator {} holds the drop-off at floor {} until its pick-up",
                        self.label, floor
                    );
                    self.held.push(destination);
                    continue;
                }
                DestinationKind::DropOff => {
                    self.load.modify_loading(destination.capacity, LoadingOption::Remove)?;
                }
                DestinationKind::PickUp => {
                    self.reserved = self.reserved.saturating_sub(destination.capacity);
                    self.awaiting.remove(&destination.ticket);
                    self.load.modify_loading(destination.capacity, LoadingOption::Add)?;
                    self.release_held(destination.ticket);
                }
            }
            info!(
                "Elevator {} {} {} at floor {}",
                self.label,
                if destination.is_pick_up() { "picked up" } else { "dropped off" },
                destination.capacity,
                floor
            );
        }
        Ok(())
    }

    /// Queues the held drop-off of `ticket` again, now that it has boarded.
    fn release_held(&mut self, ticket: u64) {
        if let Some(position) = self.held.iter().position(|held| held.ticket == ticket) {
            let drop_off = self.held.swap_remove(position);
            let direction = Direction::between(self.floor, drop_off.floor);
            self.queue_mut(direction).push(drop_off);
        }
    }

    /// Keeps going the same way while there are stops ahead, otherwise turns
    /// around for the opposite queue, otherwise goes idle.
    fn continue_or_rest(&mut self) {
        let opposite = self.direction.opposite();
        if self.next_stop(self.direction).is_some() {
            self.advance(self.direction);
        } else if let Some(next_floor) = self.next_stop(opposite) {
            if next_floor == self.floor {
                self.direction = opposite;
                self.behaviour = Behaviour::Docked;
            } else {
                self.advance(opposite);
            }
        } else {
            self.direction = Direction::Neutral;
            self.behaviour = Behaviour::Idle;
            debug!("Elevator {} is idle at floor {}", self.label, self.floor);
        }
    }
}
