pub mod elevator_status;
pub mod fsm;
pub mod load;
pub mod unit;

pub use elevator_status::{Behaviour, ElevatorSnapshot};
pub use fsm::{RunningElevator, SharedElevator};
pub use load::{FreightLoad, Loading, LoadingOption, PassengerLoad};
pub use unit::ElevatorUnit;
