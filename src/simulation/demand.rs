use crate::simulation::plan::Vertex;
use crate::simulation::plan::Warehouse;
use crate::simulation::state::Order;
use crate::simulation::state::Urgency;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;

pub trait Demand {
    fn generate(&mut self, warehouse: &Warehouse, depot: Vertex, nr_orders: usize) -> Vec<Order>;
}

/// Draws order locations uniformly from the free cells of the warehouse,
/// excluding the depot. Seeded, so a scenario can be replayed exactly.
pub struct Uniform {
    rng: StdRng,
}

impl Uniform {
    pub fn from_seed(seed: [u8; 32]) -> Uniform {
        Uniform {
            rng: StdRng::from_seed(seed),
        }
    }
}

impl Demand for Uniform {
    fn generate(&mut self, warehouse: &Warehouse, depot: Vertex, nr_orders: usize) -> Vec<Order> {
        let cells = warehouse
            .free_cells()
            .into_iter()
            .filter(|&cell| cell != depot)
            .collect::<Vec<_>>();

        (0..nr_orders)
            .map(|id| {
                let location = cells.choose(&mut self.rng).copied().unwrap_or(depot);
                let urgency = [None, Some(Urgency::Low), Some(Urgency::Medium), Some(Urgency::High)]
                    .choose(&mut self.rng)
                    .copied()
                    .flatten();

                Order {
                    id: id as u64,
                    location,
                    weight: self.rng.gen_range(0.5..25.0),
                    fragile: self.rng.gen_bool(0.2),
                    urgency,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generates_requested_count_on_free_cells() {
        let warehouse = Warehouse::with_blocked(5, vec![Vertex { x: 2, y: 2 }]);
        let depot = Vertex { x: 0, y: 0 };
        let mut demand = Uniform::from_seed([7; 32]);

        let orders = demand.generate(&warehouse, depot, 20);
        assert_eq!(orders.len(), 20);
        for order in &orders {
            assert!(warehouse.is_free(&order.location));
            assert_ne!(order.location, depot);
            assert!(order.weight > 0.0);
        }
    }

    #[test]
    fn identical_seeds_replay_identical_scenarios() {
        let warehouse = Warehouse::new(8);
        let depot = Vertex { x: 0, y: 0 };

        let first = Uniform::from_seed([3; 32]).generate(&warehouse, depot, 10);
        let second = Uniform::from_seed([3; 32]).generate(&warehouse, depot, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn ids_are_sequential() {
        let warehouse = Warehouse::new(4);
        let orders =
            Uniform::from_seed([0; 32]).generate(&warehouse, Vertex { x: 0, y: 0 }, 3);

        assert_eq!(orders.iter().map(|o| o.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
