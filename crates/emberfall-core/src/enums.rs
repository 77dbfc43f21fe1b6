//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Combat faction. Hostility is symmetric between Player and Enemy;
/// Neutral entities (arena obstacles) are hostile to nobody.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    #[default]
    Enemy,
    Neutral,
}

impl Faction {
    /// The faction this one deals damage to, if any.
    pub fn hostile_to(self) -> Option<Faction> {
        match self {
            Faction::Player => Some(Faction::Enemy),
            Faction::Enemy => Some(Faction::Player),
            Faction::Neutral => None,
        }
    }
}

/// Agent archetype category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentArchetype {
    /// Melee grunt: chases and claws.
    Thornling,
    /// Ranged caster: telegraphed bolts and homing orbs, keeps distance.
    AshAcolyte,
    /// Boss: three phases, forced melee/ranged alternation, succession.
    EmberTyrant,
    /// Successor boss spawned when the tyrant falls. Reduced attack book.
    CinderShade,
}

/// Behavior state of an agent. Exactly one at a time; Death is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Unaware, standing.
    #[default]
    Idle,
    /// Unaware, wandering between waypoints.
    Patrol,
    /// Target acquired: closing, kiting, or repositioning.
    React,
    /// Executing an attack (windup/active/recovery sub-stages).
    Attack,
    /// Disengage hop after dwelling too long in the melee zone.
    Defend,
    /// Hit stagger.
    Hurt,
    /// Terminal. No transition out is ever permitted.
    Death,
}

/// Timed sub-stage of an executing attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackStage {
    #[default]
    Windup,
    Active,
    Recovery,
}

/// Discrete tactical distance band relative to the current target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneTag {
    Melee,
    Mid,
    Outer,
    /// No target, or target beyond the outermost band.
    #[default]
    OutOfRange,
}

/// Attack identifier. Shared vocabulary across archetypes; each archetype's
/// book selects the subset it can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackId {
    /// Thornling melee swipe.
    Claw,
    /// AshAcolyte telegraphed straight bolt.
    Bolt,
    /// AshAcolyte homing orb.
    HomingOrb,
    /// EmberTyrant light melee.
    Cleave,
    /// EmberTyrant heavy melee, sustained hit volume.
    OverheadCrush,
    /// EmberTyrant airborne slam with landing wait.
    LeapSlam,
    /// EmberTyrant fan volley.
    EmberFan,
    /// EmberTyrant staggered ring barrage of homing members.
    CinderRing,
    /// EmberTyrant single homing projectile.
    HomingGout,
}

/// Coarse attack family used by the forced-alternation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackGroup {
    Melee,
    Ranged,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    Complete,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
