/// ----- DESTINATIONS -----
/// Stops an elevator has committed to, and the two directional queues that
/// hold them. The upward queue hands out the nearest floor above first and the
/// downward queue the nearest floor below first, so a car sweeping in one
/// direction never skips a closer stop for a farther one.
///
/// Both stops of one request share a ticket, which lets the car tell whether
/// the people (or goods) a drop-off is for have boarded yet.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::direction::Direction;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    PickUp,
    DropOff,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub floor: u8,
    pub kind: DestinationKind,
    pub capacity: u32,
    pub ticket: u64,
}

impl Destination {
    pub fn pick_up(floor: u8, capacity: u32, ticket: u64) -> Self {
        Destination {
            floor,
            kind: DestinationKind::PickUp,
            capacity,
            ticket,
        }
    }

    pub fn drop_off(floor: u8, capacity: u32, ticket: u64) -> Self {
        Destination {
            floor,
            kind: DestinationKind::DropOff,
            capacity,
            ticket,
        }
    }

    pub fn is_pick_up(&self) -> bool {
        self.kind == DestinationKind::PickUp
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorOrder {
    NearestAboveFirst,
    NearestBelowFirst,
}

impl FloorOrder {
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Down => FloorOrder::NearestBelowFirst,
            Direction::Up | Direction::Neutral => FloorOrder::NearestAboveFirst,
        }
    }

    /// `Less` when a stop at floor `a` is served before one at floor `b`.
    pub fn compare(self, a: u8, b: u8) -> Ordering {
        match self {
            FloorOrder::NearestAboveFirst => a.cmp(&b),
            FloorOrder::NearestBelowFirst => b.cmp(&a),
        }
    }
}

#[derive(Debug, Clone)]
struct QueuedDestination {
    order: FloorOrder,
    destination: Destination,
}

impl PartialEq for QueuedDestination {
    fn eq(&self, other: &QueuedDestination) -> bool {
        self.destination.floor == other.destination.floor
    }
}

impl Eq for QueuedDestination {}

impl PartialOrd for QueuedDestination {
    fn partial_cmp(&self, other: &QueuedDestination) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedDestination {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest entry, so the first one to serve must compare greatest
        self.order.compare(other.destination.floor, self.destination.floor)
    }
}

#[derive(Debug, Clone)]
pub struct DestinationQueue {
    direction: Direction,
    order: FloorOrder,
    heap: BinaryHeap<QueuedDestination>,
}

impl DestinationQueue {
    pub fn new(direction: Direction) -> Self {
        DestinationQueue {
            direction,
            order: FloorOrder::for_direction(direction),
            heap: BinaryHeap::new(),
        }
    }

    pub fn upward() -> Self {
        Self::new(Direction::Up)
    }

    pub fn downward() -> Self {
        Self::new(Direction::Down)
    }

    pub fn push(&mut self, destination: Destination) {
        self.heap.push(QueuedDestination {
            order: self.order,
            destination,
        });
    }

    /// The first stop a car standing at `floor` reaches when it travels in
    /// this queue's direction. Stops the car has already passed are skipped.
    pub fn next_from(&self, floor: u8) -> Option<&Destination> {
        let head = &self.heap.peek()?.destination;
        if self.reachable_from(floor, head.floor) {
            return Some(head);
        }
        self.heap
            .iter()
            .map(|queued| &queued.destination)
            .filter(|destination| self.reachable_from(floor, destination.floor))
            .min_by(|a, b| self.order.compare(a.floor, b.floor))
    }

    fn reachable_from(&self, floor: u8, target: u8) -> bool {
        target == floor || self.direction.is_ahead(floor, target)
    }

    /// Removes every destination that targets `floor`.
    pub fn pop_floor(&mut self, floor: u8) -> Vec<Destination> {
        let (served, kept): (Vec<QueuedDestination>, Vec<QueuedDestination>) =
            std::mem::take(&mut self.heap)
                .into_vec()
                .into_iter()
                .partition(|queued| queued.destination.floor == floor);
        self.heap = BinaryHeap::from(kept);
        served.into_iter().map(|queued| queued.destination).collect()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queued destinations in the order they would be served.
    pub fn to_sorted_vec(&self) -> Vec<Destination> {
        let mut queued: Vec<QueuedDestination> = self.heap.clone().into_vec();
        queued.sort_by(|a, b| b.cmp(a));
        queued.into_iter().map(|queued| queued.destination).collect()
    }
}
