pub mod demand;
pub mod plan;
pub mod settings;
pub mod simulation;
pub mod state;
pub mod tables;
pub mod telemetry;
