use crate::algorithm::path::PathError;
use crate::algorithm::path::Route;
use crate::simulation::plan::Vertex;
use crate::simulation::plan::Warehouse;
use fnv::FnvHashMap;
use fnv::FnvHashSet;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;

/// A* over the 4-neighbor grid graph with unit edge cost and the Manhattan
/// heuristic, so a returned route is always of minimal length. The frontier
/// is ordered by `f = g + h` with ties broken in insertion order.
///
/// Both endpoints must lie on the grid. A blocked or unreachable goal yields
/// `Ok` with an empty route; that is a recoverable outcome, not an error.
pub fn find_path(warehouse: &Warehouse, start: Vertex, goal: Vertex) -> Result<Route, PathError> {
    for vertex in [start, goal] {
        if !warehouse.contains(&vertex) {
            return Err(PathError::OutOfBounds {
                vertex,
                size: warehouse.size(),
            });
        }
    }
    if start == goal {
        return Ok(Route::empty());
    }
    if warehouse.is_blocked(&goal) {
        return Ok(Route::empty());
    }

    let mut insertions = 0;
    let mut frontier: PriorityQueue<Vertex, Reverse<(u64, u64)>> = PriorityQueue::new();
    frontier.push(start, Reverse((start.manhattan(goal), insertions)));

    let mut came_from: FnvHashMap<Vertex, Vertex> = FnvHashMap::default();
    let mut known_costs: FnvHashMap<Vertex, u64> = map![start => 0];
    let mut closed: FnvHashSet<Vertex> = FnvHashSet::default();

    while let Some((current, _)) = frontier.pop() {
        if current == goal {
            return Ok(reconstruct(&came_from, start, goal));
        }
        closed.insert(current);

        // Finalized when popped, so the stored cost is optimal.
        let through_current = known_costs[&current] + 1;
        for neighbor in warehouse.neighbors(&current) {
            if closed.contains(&neighbor) {
                continue;
            }
            let improves = match known_costs.get(&neighbor) {
                None => true,
                Some(&known) => through_current < known,
            };
            if improves {
                known_costs.insert(neighbor, through_current);
                came_from.insert(neighbor, current);
                insertions += 1;
                frontier.push(
                    neighbor,
                    Reverse((through_current + neighbor.manhattan(goal), insertions)),
                );
            }
        }
    }

    Ok(Route::empty())
}

fn reconstruct(came_from: &FnvHashMap<Vertex, Vertex>, start: Vertex, goal: Vertex) -> Route {
    let mut steps = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == start {
            break;
        }
        steps.push(previous);
        current = previous;
    }
    steps.reverse();

    Route::new(steps)
}

/// Obstacle-blind substitute for when no planned route exists: each step
/// moves one cell toward the goal on both axes at once where possible.
/// Only the simulation invokes this, and it flags the route as unplanned.
pub fn straight_line(start: Vertex, goal: Vertex) -> Route {
    let Vertex { mut x, mut y } = start;
    let mut steps = Vec::new();
    while (x, y) != (goal.x, goal.y) {
        if x < goal.x {
            x += 1;
        } else if x > goal.x {
            x -= 1;
        }
        if y < goal.y {
            y += 1;
        } else if y > goal.y {
            y -= 1;
        }
        steps.push(Vertex { x, y });
    }

    Route::new(steps)
}
