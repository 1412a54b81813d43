use crate::algorithm::assignment::select_robot;
use crate::algorithm::assignment::Scorer;
use crate::algorithm::assignment::SelectionBasis;
use crate::algorithm::path::grid_astar;
use crate::algorithm::path::PathError;
use crate::algorithm::path::Route;
use crate::simulation::plan::Vertex;
use crate::simulation::plan::Warehouse;
use crate::simulation::settings::Settings;
use crate::simulation::state::Order;
use crate::simulation::state::OrderPhase;
use crate::simulation::state::Robot;
use crate::simulation::state::State;
use crate::simulation::telemetry::ActiveOrder;
use crate::simulation::telemetry::Sink;
use crate::simulation::telemetry::Snapshot;
use log::info;
use log::warn;

/// Drives the dispatch loop: one pending order at a time, in input order.
/// Each order is assigned a robot, routed to the pickup cell and then to the
/// depot, with a snapshot emitted after every movement step and phase
/// transition. Degraded outcomes (emergency assignments, straight-line
/// substitutes, failed orders) are counted in the summary and never abort
/// the run.
pub struct Simulation<'w, 's> {
    warehouse: &'w Warehouse,
    settings: &'s Settings,
    scorer: Box<dyn Scorer>,
    sink: Box<dyn Sink>,

    state: State,
    tick: u64,
    summary: RunSummary,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub completed: u64,
    pub skipped: u64,
    pub emergency_assignments: u64,
    pub unplanned_routes: u64,
    pub steps: u64,
}

impl<'w, 's> Simulation<'w, 's> {
    pub fn new(
        warehouse: &'w Warehouse,
        settings: &'s Settings,
        scorer: Box<dyn Scorer>,
        sink: Box<dyn Sink>,
        robots: Vec<Robot>,
        orders: Vec<Order>,
    ) -> Simulation<'w, 's> {
        debug_assert!(robots.iter().all(|robot| warehouse.is_free(&robot.position)));

        Simulation {
            warehouse,
            settings,
            scorer,
            sink,

            state: State::new(robots, orders),
            tick: 0,
            summary: RunSummary::default(),
        }
    }
    pub fn run(mut self) -> RunSummary {
        if self.state.robots.is_empty() {
            warn!(
                "robot table is empty; skipping all {} pending orders",
                self.state.pending.len(),
            );
            self.summary.skipped = self.state.pending.len() as u64;
            self.state.pending.clear();
            return self.summary;
        }

        while let Some(order) = self.state.pending.front().cloned() {
            match self.process_order(&order) {
                Ok(()) => {
                    self.state.pending.pop_front();
                    self.summary.completed += 1;
                    self.emit(&order, OrderPhase::Completed, true);
                    info!("order {} delivered to the depot", order.id);
                }
                Err(error) => {
                    warn!("order {} dropped: {}", order.id, error);
                    self.state.pending.pop_front();
                    self.summary.skipped += 1;
                }
            }
        }
        info!(
            "run finished: {} completed, {} skipped, {} emergency, {} unplanned, {} steps",
            self.summary.completed,
            self.summary.skipped,
            self.summary.emergency_assignments,
            self.summary.unplanned_routes,
            self.summary.steps,
        );

        self.summary
    }
    fn process_order(&mut self, order: &Order) -> Result<(), PathError> {
        let selection = match select_robot(order, &self.state.robots, self.scorer.as_ref()) {
            Some(selection) => selection,
            // Empty robot table is handled before the loop.
            None => return Ok(()),
        };
        if selection.basis == SelectionBasis::Emergency {
            self.summary.emergency_assignments += 1;
        }
        info!(
            "assigned {} to order {} ({:?})",
            self.state.robots[selection.robot].id, order.id, selection.basis,
        );
        self.emit(order, OrderPhase::RobotAssigned, true);

        let start = self.state.robots[selection.robot].position;
        let (outbound, planned) = self.route_or_substitute(start, order.location)?;
        self.execute(selection.robot, order, OrderPhase::EnRouteToPickup, &outbound, planned);

        let (inbound, planned) = self.route_or_substitute(order.location, self.settings.depot)?;
        self.execute(selection.robot, order, OrderPhase::EnRouteToDepot, &inbound, planned);

        Ok(())
    }
    fn route_or_substitute(&mut self, from: Vertex, to: Vertex) -> Result<(Route, bool), PathError> {
        let route = grid_astar::find_path(self.warehouse, from, to)?;
        if route.is_empty() && from != to {
            warn!(
                "no path from {:?} to {:?}; substituting a straight-line route",
                from, to,
            );
            self.summary.unplanned_routes += 1;
            return Ok((grid_astar::straight_line(from, to), false));
        }

        Ok((route, true))
    }
    fn execute(
        &mut self,
        robot: usize,
        order: &Order,
        phase: OrderPhase,
        route: &Route,
        planned: bool,
    ) {
        for &vertex in route.steps() {
            self.state.robots[robot].position = vertex;
            self.tick += 1;
            self.summary.steps += 1;
            self.emit(order, phase, planned);
        }
    }
    fn emit(&mut self, order: &Order, phase: OrderPhase, planned: bool) {
        let snapshot = Snapshot::capture(
            self.tick,
            &self.state,
            Some(ActiveOrder {
                order: order.id,
                phase,
                planned,
            }),
        );
        self.sink.emit(&snapshot);
    }
}
