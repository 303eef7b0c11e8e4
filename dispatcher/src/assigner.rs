/// ----- AVAILABILITY ASSIGNER -----
/// This stateless module ranks elevators for a request. It takes snapshots of
/// the elevators and the request and returns how well suited each one is,
/// rewarding cars that are close to the caller, already heading the caller's
/// way and with room to spare. Room is what is neither on board nor promised
/// to a pending pick-up, so a car that could not board anyone never wins. The building's highest floor scales every term so
/// scores of different cars are comparable.

use elevator::ElevatorSnapshot;
use shared_resources::direction::Direction;
use shared_resources::request::Request;

/// Score of an elevator that cannot take the request at all. Lower than any
/// score an available elevator can reach.
pub const UNAVAILABLE: i64 = -1;

pub fn availability_score(elevator: &ElevatorSnapshot, request: &Request) -> i64 {
    if request.class != elevator.class || elevator.free_capacity == 0 {
        return UNAVAILABLE;
    }

    let highest_floor = i64::from(elevator.highest_floor);
    let mut score = 0;

    let distance = i64::from(elevator.floor.abs_diff(request.source_floor));
    score += if distance == 0 { highest_floor } else { (highest_floor - 1) / distance };

    if request.direction() == elevator.direction {
        score += highest_floor;
    } else if elevator.direction == Direction::Neutral {
        score += highest_floor / 2;
    }

    score += i64::from(elevator.free_capacity) * highest_floor
        / i64::from(elevator.maximum_capacity);

    score
}

/// Picks the best scoring elevator. The first of equally good candidates wins,
/// so callers decide the tie-break through the order they pass snapshots in.
pub fn best_candidate<'a, I>(snapshots: I, request: &Request) -> Option<(&'a ElevatorSnapshot, i64)>
where
    I: IntoIterator<Item = &'a ElevatorSnapshot>,
{
    let mut best: Option<(&ElevatorSnapshot, i64)> = None;
    for snapshot in snapshots {
        let score = availability_score(snapshot, request);
        if score == UNAVAILABLE {
            continue;
        }
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((snapshot, score));
        }
    }
    best
}
