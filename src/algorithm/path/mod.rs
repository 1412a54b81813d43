use crate::simulation::plan::Vertex;
use thiserror::Error;

pub mod grid_astar;

/// Cells a robot moves through, one per simulation step. The start cell is
/// excluded, the goal cell included. Empty means either "no movement
/// needed" or "no path found"; the caller distinguishes by comparing the
/// endpoints.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Route {
    steps: Vec<Vertex>,
}

impl Route {
    pub fn new(steps: Vec<Vertex>) -> Route {
        Route { steps }
    }
    pub fn empty() -> Route {
        Route { steps: Vec::new() }
    }
    pub fn steps(&self) -> &[Vertex] {
        &self.steps
    }
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    pub fn destination(&self) -> Option<Vertex> {
        self.steps.last().copied()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum PathError {
    #[error("vertex {vertex:?} lies outside the {size}x{size} grid")]
    OutOfBounds { vertex: Vertex, size: u64 },
}
