//! Assigns delivery orders to warehouse robots and routes each robot across
//! a grid with static obstacles: pickup at the order location, drop-off at
//! the depot.

#[macro_use]
mod macros;

pub mod algorithm;
pub mod knowledge;
pub mod simulation;

#[cfg(test)]
mod test;
