//! Events emitted by the simulation for presentation and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Combat notifications for the presentation layer (animation, audio,
/// screen shake). Unit 0 is the hero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    HealthChanged { unit: u32, current: u32, max: u32 },
    /// Fires exactly once per unit lifetime.
    UnitDied { unit: u32 },
    /// A phase threshold fired. Index 1 is the first threshold.
    PhaseStarted { unit: u32, phase_index: u32 },
    AttackStarted { unit: u32, attack: AttackId },
    /// Emitted on both normal completion and cancellation.
    AttackEnded { unit: u32, attack: AttackId },
    HitLanded { attacker: u32, target: u32, amount: u32 },
    /// Cast warning shown ahead of a telegraphed strike.
    TelegraphShown { unit: u32, attack: AttackId },
    ProjectileLaunched { unit: u32, attack: AttackId },
    SuccessorSpawned {
        predecessor: u32,
        successor: u32,
        archetype: AgentArchetype,
    },
}

/// Diagnostic for the UI alert queue. Recoverable anomalies (invalid
/// transition requests, missing collaborators) surface here, never as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
