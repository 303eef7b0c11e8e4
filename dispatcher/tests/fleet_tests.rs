use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};

use dispatcher::Fleet;
use elevator::{Behaviour, ElevatorUnit, LoadingOption};
use shared_resources::config::{BuildingConfig, ElevatorSettings};
use shared_resources::direction::Direction;
use shared_resources::elevator_class::ElevatorClass;
use shared_resources::error::SimulatorError;
use shared_resources::request::Request;

const FLOORS: u8 = 20;

fn passenger(label: &str, floor: u8) -> ElevatorUnit {
    ElevatorUnit::new(label, ElevatorClass::Passenger, 0, FLOORS - 1, 10)
        .unwrap()
        .starting_at(floor)
        .unwrap()
}

fn freight(label: &str, floor: u8) -> ElevatorUnit {
    ElevatorUnit::new(label, ElevatorClass::Freight, 0, FLOORS - 1, 10)
        .unwrap()
        .starting_at(floor)
        .unwrap()
}

fn mixed_fleet() -> Fleet {
    Fleet::from_units(
        FLOORS,
        vec![passenger("P1", 0), passenger("P2", 6), passenger("P3", 0), freight("F1", 0)],
    )
    .unwrap()
}

#[test]
fn build_labels_elevators_per_class() {
    let settings = vec![
        ElevatorSettings { class: ElevatorClass::Passenger, units: 2, capacity: 10 },
        ElevatorSettings { class: ElevatorClass::Freight, units: 1, capacity: 500 },
        ElevatorSettings { class: ElevatorClass::Passenger, units: 1, capacity: 6 },
    ];
    let fleet = Fleet::build(FLOORS, &settings).unwrap();

    assert_eq!(fleet.labels(), vec!["F1", "P1", "P2", "P3"]);
    assert_eq!(fleet.num_floors(), FLOORS);
    let p3 = fleet.elevator("P3").unwrap();
    assert_eq!(p3.lock().maximum_capacity(), 6);
    assert_eq!(p3.lock().highest_floor(), FLOORS - 1);
}

#[test]
fn build_rejects_invalid_settings() {
    let valid = ElevatorSettings { class: ElevatorClass::Passenger, units: 1, capacity: 10 };
    assert!(matches!(
        Fleet::build(0, &[valid.clone()]),
        Err(SimulatorError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Fleet::build(FLOORS, &[ElevatorSettings { units: 0, ..valid.clone() }]),
        Err(SimulatorError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Fleet::build(FLOORS, &[ElevatorSettings { capacity: 0, ..valid }]),
        Err(SimulatorError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Fleet::from_units(FLOORS, vec![passenger("P1", 0), passenger("P1", 3)]),
        Err(SimulatorError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Fleet::from_units(0, Vec::new()),
        Err(SimulatorError::InvalidConfiguration(_))
    ));
}

#[test]
fn default_configuration_builds() {
    let fleet = Fleet::from_config(&BuildingConfig::default()).unwrap();
    assert_eq!(fleet.labels(), vec!["F1", "P1", "P2", "P3"]);
}

#[test]
fn status_of_single_and_all_elevators() {
    let fleet = mixed_fleet();
    assert_eq!(
        fleet.status("P1").unwrap(),
        "Elevator P1 is Idle at Floor 0 carrying 0 passengers"
    );
    assert_eq!(
        fleet.status("F1").unwrap(),
        "Elevator F1 is Idle at Floor 0 carrying 0 kg of freight"
    );
    assert!(matches!(fleet.status("W1"), Err(SimulatorError::UnknownElevator(label)) if label == "W1"));

    let statuses = fleet.statuses().unwrap();
    assert_eq!(statuses.len(), 4);
    assert!(statuses[2].starts_with("Elevator P2 is Idle at Floor 6"));

    let empty = Fleet::from_units(FLOORS, Vec::new()).unwrap();
    assert!(matches!(empty.statuses(), Err(SimulatorError::EmptyFleet)));
}

#[test]
fn closest_elevator_takes_the_request() {
    let fleet = mixed_fleet();

    let assignment = fleet.enqueue_request(&Request::passenger(4, 18, 5).unwrap()).unwrap();

    assert_eq!(assignment.label, "P2");
    assert_eq!(assignment.boarded, 5);
    let p2 = fleet.elevator("P2").unwrap();
    assert_eq!(p2.lock().direction(), Direction::Down);
    assert_eq!(p2.lock().downward_destinations().len(), 1);
    assert_eq!(p2.lock().upward_destinations().len(), 1);
}

#[test]
fn ties_go_to_the_lowest_label() {
    let fleet = mixed_fleet();
    let assignment = fleet.enqueue_request(&Request::passenger(0, 5, 1).unwrap()).unwrap();
    assert_eq!(assignment.label, "P1");
}

#[test]
fn freight_requests_only_reach_freight_elevators() {
    let fleet = mixed_fleet();
    let assignment = fleet.enqueue_request(&Request::freight(6, 1, 25).unwrap()).unwrap();
    assert_eq!(assignment, dispatcher::Assignment { label: String::from("F1"), boarded: 10 });
}

#[test]
fn no_available_elevator_when_fleet_is_empty_or_full() {
    let empty = Fleet::from_units(FLOORS, Vec::new()).unwrap();
    assert!(matches!(
        empty.enqueue_request(&Request::passenger(1, 2, 1).unwrap()),
        Err(SimulatorError::NoAvailableElevator)
    ));

    let mut full = freight("F1", 3);
    full.modify_loading(10, LoadingOption::Add).unwrap();
    let fleet = Fleet::from_units(FLOORS, vec![full, passenger("P1", 3)]).unwrap();
    assert!(matches!(
        fleet.enqueue_request(&Request::freight(3, 4, 1).unwrap()),
        Err(SimulatorError::NoAvailableElevator)
    ));
    assert!(!fleet.elevator("P1").unwrap().lock().has_pending_destinations());
}

#[test]
fn a_car_with_every_place_promised_is_passed_over() {
    let fleet = Fleet::from_units(FLOORS, vec![passenger("P1", 0), passenger("P2", 19)]).unwrap();

    let first = fleet.enqueue_request(&Request::passenger(2, 5, 10).unwrap()).unwrap();
    assert_eq!(first.label, "P1");
    assert_eq!(first.boarded, 10);
    assert_eq!(fleet.elevator("P1").unwrap().lock().current_load(), 0);

    let second = fleet.enqueue_request(&Request::passenger(1, 3, 4).unwrap()).unwrap();
    assert_eq!(second, dispatcher::Assignment { label: String::from("P2"), boarded: 4 });

    let third = fleet.enqueue_request(&Request::passenger(1, 3, 10).unwrap()).unwrap();
    assert_eq!(third, dispatcher::Assignment { label: String::from("P2"), boarded: 6 });

    assert!(matches!(
        fleet.enqueue_request(&Request::passenger(4, 0, 1).unwrap()),
        Err(SimulatorError::NoAvailableElevator)
    ));
}

#[test]
fn requests_outside_the_building_are_rejected() {
    let fleet = mixed_fleet();
    let request = Request::passenger(2, 25, 1).unwrap();
    assert!(matches!(
        fleet.enqueue_request(&request),
        Err(SimulatorError::InvalidRequest(_))
    ));

    let same_floor = Request { source_floor: 4, destination_floor: 4, capacity: 1, class: ElevatorClass::Passenger };
    assert!(matches!(
        fleet.enqueue_request(&same_floor),
        Err(SimulatorError::InvalidRequest(_))
    ));
}

#[test]
fn concurrent_requests_never_overbook_an_elevator() {
    let fleet = Arc::new(
        Fleet::from_units(FLOORS, vec![passenger("P1", 0), passenger("P2", 10)]).unwrap(),
    );

    let workers: Vec<_> = (0..8u8)
        .map(|worker| {
            let fleet = fleet.clone();
            thread::spawn(move || {
                let source = worker * 2;
                let request = Request::passenger(source, source + 1, 3).unwrap();
                fleet.enqueue_request(&request)
            })
        })
        .collect();

    let mut boarded: HashMap<String, u32> = HashMap::new();
    for worker in workers {
        if let Ok(assignment) = worker.join().unwrap() {
            assert!(assignment.boarded > 0, "{} took a request it cannot board", assignment.label);
            *boarded.entry(assignment.label).or_insert(0) += assignment.boarded;
        }
    }

    for label in fleet.labels() {
        let elevator = fleet.elevator(&label).unwrap();
        let unit = elevator.lock();
        let promised = boarded.get(&label).copied().unwrap_or(0);
        assert!(promised <= unit.maximum_capacity());
        assert_eq!(unit.free_capacity() + promised, unit.maximum_capacity());
        assert_eq!(unit.remaining_capacity() + unit.current_load(), unit.maximum_capacity());
    }
}

fn step_until<F>(tickers: &[Sender<Instant>], max_ticks: usize, mut done: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..max_ticks {
        if done() {
            return true;
        }
        for ticker in tickers {
            ticker.send(Instant::now()).unwrap();
        }
    }
    done()
}

#[test]
fn activated_fleet_serves_requests_and_goes_idle() {
    let fleet = mixed_fleet();
    let mut tickers = Vec::new();
    let handle = fleet
        .activate_with(|_| {
            let (tick_tx, tick_rx) = bounded(0);
            tickers.push(tick_tx);
            tick_rx
        })
        .unwrap();
    assert_eq!(handle.len(), 4);

    let first = fleet.enqueue_request(&Request::passenger(4, 18, 5).unwrap()).unwrap();
    let second = fleet.enqueue_request(&Request::passenger(15, 2, 4).unwrap()).unwrap();
    let cargo = fleet.enqueue_request(&Request::freight(9, 0, 7).unwrap()).unwrap();
    assert_eq!(cargo.label, "F1");

    let settled = step_until(&tickers, 200, || {
        fleet.snapshots().iter().all(|snapshot| {
            snapshot.behaviour == Behaviour::Idle
                && snapshot.direction == Direction::Neutral
                && snapshot.upward_stops + snapshot.downward_stops == 0
        })
    });
    assert!(settled, "fleet did not settle: {:?}", fleet.statuses().unwrap());
    assert!(handle.finished().is_empty());
    handle.shutdown().unwrap();

    let first_car = fleet.elevator(&first.label).unwrap();
    assert_eq!(first_car.lock().current_load(), 0);
    let second_car = fleet.elevator(&second.label).unwrap();
    assert_eq!(second_car.lock().current_load(), 0);
    assert_eq!(fleet.elevator("F1").unwrap().lock().floor(), 0);
    for snapshot in fleet.snapshots() {
        assert!(snapshot.floor <= FLOORS - 1);
        assert_eq!(snapshot.current_load, 0);
    }
}

#[test]
fn activation_does_not_wait_for_the_loops() {
    let fleet = mixed_fleet();
    let started = Instant::now();
    let handle = fleet.activate(Duration::from_secs(3600)).unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(handle.len(), fleet.len());
    handle.shutdown().unwrap();
}

#[test]
fn a_failing_loop_is_reported_by_the_handle() {
    let fleet = Fleet::from_units(FLOORS, vec![passenger("P1", 0)]).unwrap();
    let (tick_tx, tick_rx) = bounded(0);
    let handle = fleet.activate_with(|_| tick_rx.clone()).unwrap();

    fleet.enqueue_request(&Request::passenger(3, 5, 4).unwrap()).unwrap();
    fleet.elevator("P1").unwrap().lock().modify_loading(10, LoadingOption::Add).unwrap();
    drop(tick_rx);

    let mut delivered = 0;
    while delivered < 20 && tick_tx.send(Instant::now()).is_ok() {
        delivered += 1;
    }
    assert_eq!(delivered, 5);

    let deadline = Instant::now() + Duration::from_secs(5);
    while handle.finished().is_empty() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(handle.finished(), vec!["P1"]);
    assert!(matches!(
        handle.shutdown(),
        Err(SimulatorError::CapacityExceeded { requested: 4, remaining: 0 })
    ));
}
