//! Simulation engine for EMBERFALL.
//!
//! Owns the hecs ECS world, runs the combat AI systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod encounter;
pub mod engine;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use emberfall_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
