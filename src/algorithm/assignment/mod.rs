use crate::simulation::state::Order;
use crate::simulation::state::Robot;
use log::warn;

pub mod heuristic;
pub mod predictive;

/// Ranks a robot for an order. `None` declines the robot, leaving it to the
/// nearest-feasible fallback. Implementations must be pure queries over the
/// given snapshot.
pub trait Scorer {
    fn score(&self, order: &Order, robot: &Robot) -> Option<f64>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Selection {
    pub robot: usize,
    pub basis: SelectionBasis,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SelectionBasis {
    /// Best feasible candidate according to the scorer.
    Scored,
    /// The scorer declined every feasible robot; nearest one by distance.
    NearestFeasible,
    /// No robot can carry the order. The first robot is drafted anyway and
    /// the caller must report the degraded outcome.
    Emergency,
}

/// Picks a robot for `order`. Infeasible robots (capacity below the order
/// weight) are excluded from ranking; they can only surface through the
/// explicitly flagged emergency fallback. Ties go to the lowest robot
/// index. Returns `None` only for an empty robot table.
pub fn select_robot(order: &Order, robots: &[Robot], scorer: &dyn Scorer) -> Option<Selection> {
    if robots.is_empty() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, robot) in robots.iter().enumerate() {
        if !robot.can_carry(order) {
            continue;
        }
        if let Some(score) = scorer.score(order, robot) {
            if best.map_or(true, |(_, other)| score > other) {
                best = Some((index, score));
            }
        }
    }
    if let Some((robot, _)) = best {
        return Some(Selection {
            robot,
            basis: SelectionBasis::Scored,
        });
    }

    let mut nearest: Option<(usize, f64)> = None;
    for (index, robot) in robots.iter().enumerate() {
        if !robot.can_carry(order) {
            continue;
        }
        let distance = robot.position.euclidean(order.location);
        if nearest.map_or(true, |(_, other)| distance < other) {
            nearest = Some((index, distance));
        }
    }
    if let Some((robot, _)) = nearest {
        return Some(Selection {
            robot,
            basis: SelectionBasis::NearestFeasible,
        });
    }

    warn!(
        "no robot can carry order {} ({} kg); emergency assignment to {}",
        order.id, order.weight, robots[0].id,
    );
    Some(Selection {
        robot: 0,
        basis: SelectionBasis::Emergency,
    })
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::simulation::plan::Vertex;

    pub fn order(weight: f64, x: u64, y: u64) -> Order {
        Order {
            id: 0,
            location: Vertex { x, y },
            weight,
            fragile: false,
            urgency: None,
        }
    }

    pub fn robot(id: &str, capacity: f64, x: u64, y: u64) -> Robot {
        Robot {
            id: id.to_string(),
            position: Vertex { x, y },
            load_capacity: capacity,
            battery: 80.0,
            speed: 1.0,
        }
    }

    /// Scores every robot identically, forcing the tie-break.
    struct Constant;
    impl Scorer for Constant {
        fn score(&self, _: &Order, _: &Robot) -> Option<f64> {
            Some(1.0)
        }
    }

    /// Declines every robot, forcing the nearest-feasible fallback.
    struct Declines;
    impl Scorer for Declines {
        fn score(&self, _: &Order, _: &Robot) -> Option<f64> {
            None
        }
    }

    #[test]
    fn infeasible_robots_are_never_ranked() {
        let robots = vec![robot("A", 10.0, 0, 0), robot("B", 3.0, 0, 0)];
        let order = order(5.0, 3, 0);

        let selection = select_robot(&order, &robots, &Constant).unwrap();
        assert_eq!(selection.robot, 0);
        assert_eq!(selection.basis, SelectionBasis::Scored);
    }

    #[test]
    fn ties_break_to_lowest_index() {
        let robots = vec![
            robot("R1", 10.0, 5, 5),
            robot("R2", 10.0, 5, 5),
            robot("R3", 10.0, 5, 5),
        ];

        let selection = select_robot(&order(1.0, 0, 0), &robots, &Constant).unwrap();
        assert_eq!(selection.robot, 0);
    }

    #[test]
    fn declined_scorer_falls_back_to_nearest_feasible() {
        let robots = vec![
            robot("far", 10.0, 9, 9),
            robot("near", 10.0, 2, 0),
            robot("light", 1.0, 0, 0),
        ];

        let selection = select_robot(&order(5.0, 0, 0), &robots, &Declines).unwrap();
        assert_eq!(selection.robot, 1);
        assert_eq!(selection.basis, SelectionBasis::NearestFeasible);
    }

    #[test]
    fn emergency_fallback_is_flagged() {
        let robots = vec![robot("R1", 2.0, 0, 0), robot("R2", 3.0, 0, 0)];

        let selection = select_robot(&order(50.0, 4, 4), &robots, &Constant).unwrap();
        assert_eq!(
            selection,
            Selection {
                robot: 0,
                basis: SelectionBasis::Emergency,
            },
        );
    }

    #[test]
    fn empty_table_selects_nothing() {
        assert_eq!(select_robot(&order(1.0, 0, 0), &[], &Constant), None);
    }

    #[test]
    fn selection_is_deterministic() {
        let robots = vec![
            robot("R1", 8.0, 1, 7),
            robot("R2", 4.0, 3, 3),
            robot("R3", 9.0, 6, 2),
        ];
        let order = order(5.0, 4, 4);

        let first = select_robot(&order, &robots, &Constant);
        for _ in 0..5 {
            assert_eq!(select_robot(&order, &robots, &Constant), first);
        }
    }
}
