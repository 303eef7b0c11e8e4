use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{tick, Receiver};
use log::{error, info, warn};
use parking_lot::Mutex;

use elevator::fsm::{self, RunningElevator};
use elevator::{ElevatorSnapshot, ElevatorUnit, SharedElevator};
use shared_resources::config::{BuildingConfig, ElevatorSettings};
use shared_resources::elevator_class::ElevatorClass;
use shared_resources::error::{Result, SimulatorError};
use shared_resources::request::Request;

use crate::assigner;

/// Which elevator took a request and how much of it boarded.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub label: String,
    pub boarded: u32,
}

/// All elevators of one building. Elevators are kept sorted by label, which
/// is also the order ties between equally suited elevators are broken in.
pub struct Fleet {
    num_floors: u8,
    elevators: BTreeMap<String, SharedElevator>,
    dispatch_lock: Mutex<()>,
}

impl Fleet {
    /// Builds the elevators described by `settings` for a building with
    /// `num_floors` floors, numbered from 0. Labels are the class prefix and a
    /// 1-based index within the class: P1, P2, F1, ...
    pub fn build(num_floors: u8, settings: &[ElevatorSettings]) -> Result<Self> {
        let top_floor = top_floor(num_floors)?;

        let mut units = Vec::new();
        let mut next_index: HashMap<ElevatorClass, usize> = HashMap::new();
        for group in settings {
            if group.units < 1 || group.capacity < 1 {
                return Err(SimulatorError::InvalidConfiguration(format!(
                    "{} elevators need a positive number of units and capacity, got {} units of {}",
                    group.class, group.units, group.capacity
                )));
            }
            for _ in 0..group.units {
                let index = next_index.entry(group.class).or_insert(0);
                *index += 1;
                units.push(ElevatorUnit::new(
                    group.class.label(*index),
                    group.class,
                    0,
                    top_floor,
                    group.capacity,
                )?);
            }
        }

        Self::from_units(num_floors, units)
    }

    pub fn from_config(config: &BuildingConfig) -> Result<Self> {
        Self::build(config.floors, &config.elevators)
    }

    /// Wraps already constructed elevators, e.g. ones parked on other floors.
    pub fn from_units(num_floors: u8, units: Vec<ElevatorUnit>) -> Result<Self> {
        let top_floor = top_floor(num_floors)?;
        let mut elevators = BTreeMap::new();
        for unit in units {
            if unit.highest_floor() > top_floor {
                return Err(SimulatorError::InvalidConfiguration(format!(
                    "elevator {} serves floor {} but the building has {} floors",
                    unit.label(),
                    unit.highest_floor(),
                    num_floors
                )));
            }
            let label = unit.label().to_string();
            if elevators.insert(label.clone(), Arc::new(Mutex::new(unit))).is_some() {
                return Err(SimulatorError::InvalidConfiguration(format!(
                    "elevator label {} is used twice",
                    label
                )));
            }
        }

        info!("Fleet of {} elevators ready for {} floors", elevators.len(), num_floors);
        Ok(Fleet {
            num_floors,
            elevators,
            dispatch_lock: Mutex::new(()),
        })
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    pub fn len(&self) -> usize {
        self.elevators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevators.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.elevators.keys().cloned().collect()
    }

    pub fn elevator(&self, label: &str) -> Result<SharedElevator> {
        self.elevators
            .get(label)
            .cloned()
            .ok_or_else(|| SimulatorError::UnknownElevator(label.to_string()))
    }

    pub fn status(&self, label: &str) -> Result<String> {
        Ok(self.elevator(label)?.lock().status())
    }

    pub fn statuses(&self) -> Result<Vec<String>> {
        if self.elevators.is_empty() {
            return Err(SimulatorError::EmptyFleet);
        }
        Ok(self.elevators.values().map(|elevator| elevator.lock().status()).collect())
    }

    pub fn snapshots(&self) -> Vec<ElevatorSnapshot> {
        self.elevators.values().map(|elevator| elevator.lock().snapshot()).collect()
    }

    /// Hands `request` to the best suited elevator. Concurrent calls are
    /// serialized, so each request is scored against the fleet as left by the
    /// previous one; the elevators' own loops keep running meanwhile.
    pub fn enqueue_request(&self, request: &Request) -> Result<Assignment> {
        request.validate()?;
        let top_floor = top_floor(self.num_floors)?;
        if request.source_floor > top_floor || request.destination_floor > top_floor {
            return Err(SimulatorError::InvalidRequest(format!(
                "floors must be between 0 and {}, got {} to {}",
                top_floor, request.source_floor, request.destination_floor
            )));
        }

        let _dispatch = self.dispatch_lock.lock();

        let snapshots = self.snapshots();
        let (label, score) = match assigner::best_candidate(&snapshots, request) {
            Some((snapshot, score)) => (snapshot.label.clone(), score),
            None => {
                warn!("No elevator can serve {:?}", request);
                return Err(SimulatorError::NoAvailableElevator);
            }
        };

        let boarded = self.elevator(&label)?.lock().schedule_request(request)?;
        info!(
            "Elevator {} (score {}) takes {} of {} from floor {} to floor {}",
            label, score, boarded, request.capacity, request.source_floor, request.destination_floor
        );
        Ok(Assignment { label, boarded })
    }

    /// Starts every elevator's control loop, ticking once per `period`.
    pub fn activate(&self, period: Duration) -> Result<FleetHandle> {
        self.activate_with(|_| tick(period))
    }

    /// Starts every elevator's control loop with a ticker from `ticker_for`,
    /// called once per elevator label. Returns as soon as all loops are launched.
    pub fn activate_with<F>(&self, mut ticker_for: F) -> Result<FleetHandle>
    where
        F: FnMut(&str) -> Receiver<Instant>,
    {
        let mut running = Vec::with_capacity(self.elevators.len());
        for (label, elevator) in &self.elevators {
            match fsm::spawn(elevator.clone(), ticker_for(label)) {
                Ok(handle) => running.push(handle),
                Err(err) => {
                    error!("Could not launch elevator {}: {}", label, err);
                    FleetHandle { running }.shutdown()?;
                    return Err(err);
                }
            }
        }
        info!("Activated {} elevators", running.len());
        Ok(FleetHandle { running })
    }
}

fn top_floor(num_floors: u8) -> Result<u8> {
    num_floors.checked_sub(1).ok_or_else(|| {
        SimulatorError::InvalidConfiguration(String::from("a building needs at least one floor"))
    })
}

/// The running control loops of an activated fleet.
pub struct FleetHandle {
    running: Vec<RunningElevator>,
}

impl FleetHandle {
    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Labels of elevators whose loop has ended on its own.
    pub fn finished(&self) -> Vec<String> {
        self.running
            .iter()
            .filter(|elevator| elevator.is_finished())
            .map(|elevator| elevator.label().to_string())
            .collect()
    }

    /// Stops every loop and waits for all of them. The first loop error, if
    /// any, is returned after all loops have been stopped.
    pub fn shutdown(self) -> Result<()> {
        let mut outcome = Ok(());
        for elevator in self.running {
            let label = elevator.label().to_string();
            if let Err(err) = elevator.stop() {
                error!("Elevator {} ended with an error: {}", label, err);
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        outcome
    }
}
