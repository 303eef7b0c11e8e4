use std::fs;
use std::path::Path;
use std::time::Duration;

use log::warn;

use crate::elevator_class::ElevatorClass;
use crate::error::{Result, SimulatorError};
use crate::request::Request;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_TICK_MILLIS: u64 = 1500;

/// One group of identical elevators, e.g. three passenger cars for 10 people.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorSettings {
    pub class: ElevatorClass,
    pub units: u32,
    pub capacity: u32,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildingConfig {
    pub floors: u8,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    pub elevators: Vec<ElevatorSettings>,
    /// Workload the simulator binary feeds in, one request per tick.
    #[serde(default)]
    pub requests: Vec<Request>,
}

fn default_tick_millis() -> u64 {
    DEFAULT_TICK_MILLIS
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            floors: 20,
            tick_millis: DEFAULT_TICK_MILLIS,
            elevators: vec![
                ElevatorSettings { class: ElevatorClass::Passenger, units: 3, capacity: 10 },
                ElevatorSettings { class: ElevatorClass::Freight, units: 1, capacity: 1000 },
            ],
            requests: Vec::new(),
        }
    }
}

impl BuildingConfig {
    /// Reads the configuration at `path`. A missing file is not an error: the
    /// built-in defaults are used instead. A file that exists but does not parse is.
    pub fn get(path: &Path) -> Result<Self> {
        let config_contents = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                warn!("No configuration file at {}, using default settings...", path.display());
                return Ok(BuildingConfig::default());
            }
        };
        Self::from_json(&config_contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|err| {
            SimulatorError::InvalidConfiguration(format!("could not parse configuration: {}", err))
        })
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}
