use crate::algorithm::assignment::Scorer;
use crate::simulation::state::Order;
use crate::simulation::state::Robot;

/// Hand-written scoring formula: high battery is good, a long trip at low
/// speed is bad, heavy orders cost a little extra.
pub struct HeuristicScorer;

impl Scorer for HeuristicScorer {
    fn score(&self, order: &Order, robot: &Robot) -> Option<f64> {
        let distance = robot.position.euclidean(order.location);

        Some(robot.battery - distance / robot.speed - order.weight / 50.0)
    }
}
