use crate::simulation::plan::Vertex;
use std::collections::VecDeque;

/// A delivery request. Immutable once created; leaves the pending set when
/// the carrying robot reaches the depot.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: u64,
    pub location: Vertex,
    pub weight: f64,
    pub fragile: bool,
    pub urgency: Option<Urgency>,
}

#[derive(Copy, Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Robot {
    pub id: String,
    /// Mutated only by the simulation while executing a route.
    pub position: Vertex,
    pub load_capacity: f64,
    pub battery: f64,
    pub speed: f64,
}

impl Robot {
    pub fn can_carry(&self, order: &Order) -> bool {
        self.load_capacity >= order.weight
    }
}

/// Lifecycle of one order. `Completed` is terminal and removes the order
/// from the pending set.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OrderPhase {
    Pending,
    RobotAssigned,
    EnRouteToPickup,
    EnRouteToDepot,
    Completed,
}

/// Mutable tables scoped to one simulation run.
pub struct State {
    pub robots: Vec<Robot>,
    pub pending: VecDeque<Order>,
}

impl State {
    pub fn new(robots: Vec<Robot>, orders: impl IntoIterator<Item = Order>) -> State {
        State {
            robots,
            pending: orders.into_iter().collect(),
        }
    }
    pub fn pending_ids(&self) -> Vec<u64> {
        self.pending.iter().map(|order| order.id).collect()
    }
}
