use std::fmt;

/// Kind of load an elevator carries. Requests carry one too and are only ever
/// served by an elevator of the same class.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElevatorClass {
    Passenger,
    Freight,
}

impl ElevatorClass {
    pub fn label_prefix(self) -> &'static str {
        match self {
            ElevatorClass::Passenger => "P",
            ElevatorClass::Freight => "F",
        }
    }

    /// Label of the `index`-th (1-based) elevator of this class, e.g. "P2".
    pub fn label(self, index: usize) -> String {
        format!("{}{}", self.label_prefix(), index)
    }
}

impl fmt::Display for ElevatorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorClass::Passenger => f.write_str("Passenger"),
            ElevatorClass::Freight => f.write_str("Freight"),
        }
    }
}
