//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible external actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Simulation control ---
    /// Start a new encounter.
    StartEncounter,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },

    // --- Hero control ---
    /// Drive the player-controlled target. Input intelligence is external;
    /// the sim only clamps and integrates.
    SetHeroVelocity { vx: f64, vy: f64 },

    // --- Scenario / test harness ---
    /// Inject damage into a unit through the normal damage contract.
    DebugDamage { unit: u32, amount: u32 },
    /// Force a unit's death through the normal damage contract.
    DebugKill { unit: u32 },
    /// Request a behavior state directly. Invalid requests (e.g. after
    /// Death) are ignored with an alert.
    DebugSetState { unit: u32, state: BehaviorState },
}
