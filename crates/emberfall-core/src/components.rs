//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Combat rules live in `emberfall-combat-ai`; orchestration in
//! `emberfall-sim`. Snapshot-facing data is serde-derived; runtime-only
//! bookkeeping components are not serialized.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Identity of an AI-controlled combat entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentTag {
    /// Unique unit id (hero is 0; agents start at 1).
    pub id: u32,
    pub archetype: AgentArchetype,
}

/// Marks the player-controlled target entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hero;

/// Marks a static arena obstacle that blocks sight lines and projectiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle;

/// Circle collider used by all spatial queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// Health record. Mutated only through `emberfall_combat_ai::health`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    /// Permanent once set.
    pub dead: bool,
    /// Remaining invulnerability window (seconds); 0 when not invulnerable.
    pub invuln_remaining_secs: f64,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self {
            current: max,
            max,
            dead: false,
            invuln_remaining_secs: 0.0,
        }
    }

    pub fn at(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
            dead: current == 0,
            invuln_remaining_secs: 0.0,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_remaining_secs > 0.0
    }

    /// Current health as a fraction of max (0 when max is 0).
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }
}

/// Ordered health-fraction thresholds with one-shot triggered flags.
/// Thresholds are stored in descending fraction order (0.75, 0.50, 0.25):
/// index 0 is the least severe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseTrack {
    pub thresholds: Vec<f64>,
    pub triggered: Vec<bool>,
}

impl PhaseTrack {
    pub fn new(thresholds: Vec<f64>) -> Self {
        let triggered = vec![false; thresholds.len()];
        Self {
            thresholds,
            triggered,
        }
    }

    /// Current phase index: number of thresholds that have fired.
    pub fn index(&self) -> u32 {
        self.triggered.iter().filter(|t| **t).count() as u32
    }
}

/// Tactical zone tracking relative to the current target.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ZoneTracker {
    pub current: ZoneTag,
    /// Tick at which the current zone was entered.
    pub entered_tick: u64,
    /// One-shot guard for dwell-based escalation; cleared on zone change.
    pub dwell_flag_consumed: bool,
}

/// Last-fired tick per attack. Entries are created lazily on first use and
/// die with the entity.
#[derive(Debug, Clone, Default)]
pub struct CooldownLedger {
    pub last_fired: HashMap<AttackId, u64>,
}

/// The agent's decision-making state. One exclusive behavior state, a single
/// pending transition honored at the next brain dispatch, and the scratch the
/// state logic needs between ticks.
#[derive(Debug, Clone, Default)]
pub struct Brain {
    pub state: BehaviorState,
    /// Transition requested this tick, committed at the next dispatch.
    pub pending_state: Option<BehaviorState>,
    pub state_entered_tick: u64,
    /// Unit id of the current target, if any.
    pub target: Option<u32>,
    /// Facing heading in radians (0 = North, clockwise).
    pub facing: f64,
    /// Attack chosen by selection, consumed when Attack is entered.
    pub queued_attack: Option<AttackId>,
    /// Group of the last committed attack (alternation gate input).
    pub last_attack_group: Option<AttackGroup>,
    pub stagger_remaining_secs: f64,
    /// Presentation flag driven by the damage-flash sequence.
    pub flash_active: bool,
    /// Set when the death fade sequence completes.
    pub fade_complete: bool,
    pub patrol_goal: Option<Position>,
    pub patrol_retarget_secs: f64,
}

impl Brain {
    pub fn spawned_at(tick: u64) -> Self {
        Self {
            state_entered_tick: tick,
            ..Self::default()
        }
    }
}

/// Vertical motion bookkeeping for an airborne attack prelude.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeapMotion {
    pub height: f64,
    pub vertical_vel: f64,
    pub airborne_since_tick: u64,
}

impl LeapMotion {
    pub fn launched(tick: u64, vertical_speed: f64) -> Self {
        Self {
            height: 0.0,
            vertical_vel: vertical_speed,
            airborne_since_tick: tick,
        }
    }

    /// Landing predicate: descending and back at ground level.
    pub fn landed(&self) -> bool {
        self.vertical_vel <= 0.0 && self.height <= 0.0
    }
}

/// Runtime of the attack currently being executed. Exists only while the
/// agent is in the Attack state; removed on completion or cancellation.
#[derive(Debug, Clone, Default)]
pub struct AttackRuntime {
    pub attack: Option<AttackId>,
    pub stage: AttackStage,
    pub stage_entered_tick: u64,
    /// Set by a windup sequence (telegraph lead or leap landing) to release
    /// the strike; timer-driven windups ignore it.
    pub strike_released: bool,
    /// Live hit volume flag for sustained policies; disabled on first hit.
    pub volume_live: bool,
    /// Unit ids already damaged by this swing (at-most-once per target).
    pub struck: Vec<u32>,
    /// Cooldowns stamp at Active entry; guards against double stamping.
    pub cooldown_stamped: bool,
    pub leap: Option<LeapMotion>,
}

impl AttackRuntime {
    pub fn begin(attack: AttackId, tick: u64) -> Self {
        Self {
            attack: Some(attack),
            stage: AttackStage::Windup,
            stage_entered_tick: tick,
            ..Self::default()
        }
    }
}

// --- Suspendable sequences ---
//
// Plain-data cooperative routines advanced once per tick by the sim.
// Advancement logic lives in `emberfall_combat_ai::sequence`.

/// Condition a sequence can suspend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSignal {
    /// The owning agent's leap has landed.
    Landed,
}

/// Side effect emitted by a sequence step, applied by the sim through the
/// normal component contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEffect {
    /// Show a cast warning for the given attack.
    Telegraph(AttackId),
    /// Release the suspended windup into the active stage.
    BeginStrike,
    FlashOn,
    FlashOff,
    /// Death fade finished; the agent may be removed.
    FadeComplete,
}

#[derive(Debug, Clone)]
pub enum SequenceStep {
    /// Suspend for a fixed duration.
    Wait { secs: f64 },
    /// Suspend until a signal is raised, or force progress after `max_wait_secs`.
    WaitUntil {
        signal: SequenceSignal,
        max_wait_secs: f64,
    },
    /// Emit an effect and continue within the same tick.
    Emit { effect: SequenceEffect },
}

/// Cancellation scope: state-scoped sequences die with their state; orthogonal
/// sequences (damage flash) survive interruptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceScope {
    State(BehaviorState),
    Orthogonal,
}

/// A suspended cooperative routine attached to an entity.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub scope: SequenceScope,
    pub steps: Vec<SequenceStep>,
    pub cursor: usize,
    /// Seconds accumulated at the current yield point.
    pub waited_secs: f64,
}

impl Sequence {
    pub fn new(scope: SequenceScope, steps: Vec<SequenceStep>) -> Self {
        Self {
            scope,
            steps,
            cursor: 0,
            waited_secs: 0.0,
        }
    }
}

/// All sequences currently attached to an entity.
#[derive(Debug, Clone, Default)]
pub struct ActiveSequences {
    pub list: Vec<Sequence>,
}

/// Configured succession: spawn a follow-up agent when this one dies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuccessionPlan {
    pub archetype: AgentArchetype,
    /// Successor starts at `successor_max_health * starting_fraction`.
    pub starting_fraction: f64,
    /// Idempotency guard: a death sequence spawns at most one successor.
    pub done: bool,
}

// --- Projectiles ---

/// Steering policy for a projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum MotionPolicy {
    /// Fixed velocity vector.
    Straight,
    /// Velocity blended toward the target's position each tick at a bounded
    /// turn rate. Flies straight if the target is gone.
    Homing { target: Option<u32>, turn_rate: f64 },
}

/// Ephemeral projectile entity. Independent of its spawner once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub damage: u32,
    /// Unit id of the spawner, for hit attribution. The projectile outlives it.
    pub owner: u32,
    pub owner_faction: Faction,
    pub policy: MotionPolicy,
    pub lifetime_remaining_secs: f64,
    /// Set on first qualifying contact; a resolved projectile never applies
    /// damage again.
    pub resolved: bool,
}

/// Staggered ring-barrage emitter: spawns `count` homing members around a
/// center at even angular offsets, one per interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingEmitter {
    pub center: Position,
    pub count: u32,
    pub spawned: u32,
    pub ring_radius: f64,
    pub interval_secs: f64,
    pub next_spawn_in_secs: f64,
    pub member_speed: f64,
    pub damage: u32,
    pub owner: u32,
    pub owner_faction: Faction,
    pub target: Option<u32>,
}
