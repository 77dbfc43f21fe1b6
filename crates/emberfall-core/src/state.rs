//! Game state snapshot — the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, CombatEvent};
use crate::types::{Position, SimTime, Velocity};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub hero: HeroView,
    pub agents: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
    pub stats: StatsView,
    pub events: Vec<CombatEvent>,
    pub alerts: Vec<Alert>,
}

/// A visible agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: u32,
    pub archetype: AgentArchetype,
    pub position: Position,
    /// Facing heading (radians, 0 = North, clockwise).
    pub facing: f64,
    pub state: BehaviorState,
    pub zone: ZoneTag,
    pub phase_index: u32,
    pub health_current: u32,
    pub health_max: u32,
    pub invulnerable: bool,
    /// Damage-flash presentation flag.
    pub flash: bool,
    /// Attack being executed, if any.
    pub attack: Option<AttackId>,
    pub attack_stage: Option<AttackStage>,
}

/// The player-controlled target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroView {
    pub position: Position,
    pub velocity: Velocity,
    pub health_current: u32,
    pub health_max: u32,
    pub invulnerable: bool,
    pub dead: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub velocity: Velocity,
    pub homing: bool,
}

/// Running encounter statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsView {
    pub agents_slain: u32,
    pub hero_hits_taken: u32,
    pub successors_spawned: u32,
}
