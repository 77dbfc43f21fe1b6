//! Archetype-specific behavior profiles and attack books.
//!
//! Consolidates per-archetype tuning: vitals, movement, perception, zone
//! bands, phase thresholds, policy flags, succession, and the ordered attack
//! book consumed by `attacks::select_attack`.

use emberfall_core::enums::{AgentArchetype, AttackGroup, AttackId, ZoneTag};

use crate::attacks::{AttackSpec, HitPolicy, VolleyPattern, VolleySpec};

/// Behavioral profile for an agent archetype.
pub struct AgentProfile {
    pub max_health: u32,
    /// Chase speed (units/s).
    pub move_speed: f64,
    pub collider_radius: f64,
    /// Perception radius for target acquisition.
    pub aggro_radius: f64,
    /// Ranged archetypes kite around this distance; None for melee chasers.
    pub preferred_range: Option<f64>,
    /// Ascending (radius, zone) bands.
    pub zone_bands: Vec<(f64, ZoneTag)>,
    /// Descending health-fraction phase thresholds.
    pub phase_thresholds: Vec<f64>,
    /// Whether phase thresholds are evaluated while mid-attack.
    pub phase_eval_during_attack: bool,
    /// Hit stagger duration; 0 disables the Hurt reaction.
    pub hurt_stagger_secs: f64,
    /// Melee and ranged attacks must alternate.
    pub forced_alternation: bool,
    /// Escalate to Defend after this long stuck in the melee zone with no
    /// attack ready. None disables the escape.
    pub melee_dwell_escalate_secs: Option<f64>,
    /// Successor archetype and starting-health fraction.
    pub succession: Option<(AgentArchetype, f64)>,
    /// Wanders while unaware.
    pub patrols: bool,
}

/// Get the behavioral profile for a given archetype.
pub fn get_profile(archetype: AgentArchetype) -> AgentProfile {
    match archetype {
        AgentArchetype::Thornling => AgentProfile {
            max_health: 60,
            move_speed: 6.0,
            collider_radius: 0.7,
            aggro_radius: 18.0,
            preferred_range: None,
            zone_bands: vec![
                (2.0, ZoneTag::Melee),
                (8.0, ZoneTag::Mid),
                (18.0, ZoneTag::Outer),
            ],
            phase_thresholds: vec![],
            phase_eval_during_attack: true,
            hurt_stagger_secs: 0.35,
            forced_alternation: false,
            melee_dwell_escalate_secs: None,
            succession: None,
            patrols: true,
        },
        AgentArchetype::AshAcolyte => AgentProfile {
            max_health: 45,
            move_speed: 5.0,
            collider_radius: 0.6,
            aggro_radius: 22.0,
            preferred_range: Some(10.0),
            zone_bands: vec![
                (3.0, ZoneTag::Melee),
                (12.0, ZoneTag::Mid),
                (22.0, ZoneTag::Outer),
            ],
            phase_thresholds: vec![0.5],
            phase_eval_during_attack: true,
            hurt_stagger_secs: 0.3,
            forced_alternation: false,
            melee_dwell_escalate_secs: None,
            succession: None,
            patrols: true,
        },
        AgentArchetype::EmberTyrant => AgentProfile {
            max_health: 400,
            move_speed: 5.5,
            collider_radius: 1.1,
            aggro_radius: 30.0,
            preferred_range: None,
            zone_bands: vec![
                (5.0, ZoneTag::Melee),
                (12.0, ZoneTag::Mid),
                (25.0, ZoneTag::Outer),
            ],
            phase_thresholds: vec![0.75, 0.50, 0.25],
            // The tyrant defers threshold checks until the current swing ends.
            phase_eval_during_attack: false,
            hurt_stagger_secs: 0.25,
            forced_alternation: true,
            melee_dwell_escalate_secs: Some(2.5),
            succession: Some((AgentArchetype::CinderShade, 0.7)),
            patrols: false,
        },
        AgentArchetype::CinderShade => AgentProfile {
            max_health: 500,
            move_speed: 6.0,
            collider_radius: 1.0,
            aggro_radius: 30.0,
            preferred_range: None,
            zone_bands: vec![
                (5.0, ZoneTag::Melee),
                (12.0, ZoneTag::Mid),
                (25.0, ZoneTag::Outer),
            ],
            phase_thresholds: vec![0.5],
            phase_eval_during_attack: true,
            hurt_stagger_secs: 0.25,
            forced_alternation: false,
            melee_dwell_escalate_secs: None,
            succession: None,
            patrols: false,
        },
    }
}

/// Ordered attack book for an archetype. Earlier entries have priority.
pub fn attack_book(archetype: AgentArchetype) -> Vec<AttackSpec> {
    match archetype {
        AgentArchetype::Thornling => vec![claw()],
        AgentArchetype::AshAcolyte => vec![homing_orb(), bolt()],
        AgentArchetype::EmberTyrant => vec![
            cinder_ring(),
            leap_slam(),
            overhead_crush(),
            ember_fan(),
            cleave(),
            homing_gout(),
        ],
        AgentArchetype::CinderShade => vec![cleave(), ember_fan(), homing_gout()],
    }
}

/// Find one attack's spec within an archetype's book.
pub fn attack_spec(archetype: AgentArchetype, id: AttackId) -> Option<AttackSpec> {
    attack_book(archetype).into_iter().find(|s| s.id == id)
}

fn claw() -> AttackSpec {
    AttackSpec {
        id: AttackId::Claw,
        group: AttackGroup::Melee,
        zones: vec![ZoneTag::Melee],
        min_phase: 0,
        windup_secs: 0.35,
        active_secs: 0.1,
        recovery_secs: 0.5,
        cooldown_secs: 1.2,
        damage: 12,
        hit: HitPolicy::Instant {
            radius: 1.2,
            reach: 1.0,
        },
        telegraph: false,
        leap: false,
    }
}

fn bolt() -> AttackSpec {
    AttackSpec {
        id: AttackId::Bolt,
        group: AttackGroup::Ranged,
        zones: vec![ZoneTag::Melee, ZoneTag::Mid, ZoneTag::Outer],
        min_phase: 0,
        windup_secs: 0.6,
        active_secs: 0.05,
        recovery_secs: 0.6,
        cooldown_secs: 1.8,
        damage: 8,
        hit: HitPolicy::Volley(VolleySpec {
            pattern: VolleyPattern::Single { homing: false },
            speed: 14.0,
            lifetime_secs: 4.0,
        }),
        telegraph: true,
        leap: false,
    }
}

fn homing_orb() -> AttackSpec {
    AttackSpec {
        id: AttackId::HomingOrb,
        group: AttackGroup::Ranged,
        zones: vec![ZoneTag::Mid, ZoneTag::Outer],
        min_phase: 0,
        windup_secs: 0.9,
        active_secs: 0.05,
        recovery_secs: 0.8,
        cooldown_secs: 4.0,
        damage: 10,
        hit: HitPolicy::Volley(VolleySpec {
            pattern: VolleyPattern::Single { homing: true },
            speed: 9.0,
            lifetime_secs: 5.0,
        }),
        telegraph: true,
        leap: false,
    }
}

fn cleave() -> AttackSpec {
    AttackSpec {
        id: AttackId::Cleave,
        group: AttackGroup::Melee,
        zones: vec![ZoneTag::Melee],
        min_phase: 0,
        windup_secs: 0.4,
        active_secs: 0.1,
        recovery_secs: 0.6,
        cooldown_secs: 1.6,
        damage: 14,
        hit: HitPolicy::InstantBox {
            half_width: 1.0,
            half_height: 0.8,
            reach: 1.1,
        },
        telegraph: false,
        leap: false,
    }
}

fn overhead_crush() -> AttackSpec {
    AttackSpec {
        id: AttackId::OverheadCrush,
        group: AttackGroup::Melee,
        zones: vec![ZoneTag::Melee],
        min_phase: 1,
        windup_secs: 0.7,
        active_secs: 0.45,
        recovery_secs: 1.0,
        cooldown_secs: 5.0,
        damage: 20,
        hit: HitPolicy::Sustained {
            radius: 1.6,
            reach: 1.2,
        },
        telegraph: false,
        leap: false,
    }
}

fn leap_slam() -> AttackSpec {
    AttackSpec {
        id: AttackId::LeapSlam,
        group: AttackGroup::Melee,
        zones: vec![ZoneTag::Mid],
        min_phase: 1,
        // Windup duration is governed by the airborne sequence, not this timer.
        windup_secs: 0.0,
        active_secs: 0.15,
        recovery_secs: 1.0,
        cooldown_secs: 7.0,
        damage: 22,
        hit: HitPolicy::Instant {
            radius: 2.2,
            reach: 0.0,
        },
        telegraph: false,
        leap: true,
    }
}

fn ember_fan() -> AttackSpec {
    AttackSpec {
        id: AttackId::EmberFan,
        group: AttackGroup::Ranged,
        zones: vec![ZoneTag::Mid, ZoneTag::Outer],
        min_phase: 0,
        windup_secs: 0.5,
        active_secs: 0.05,
        recovery_secs: 0.9,
        cooldown_secs: 3.5,
        damage: 7,
        hit: HitPolicy::Volley(VolleySpec {
            pattern: VolleyPattern::Fan {
                count: 5,
                arc_radians: 60f64.to_radians(),
            },
            speed: 12.0,
            lifetime_secs: 4.0,
        }),
        telegraph: true,
        leap: false,
    }
}

fn cinder_ring() -> AttackSpec {
    AttackSpec {
        id: AttackId::CinderRing,
        group: AttackGroup::Ranged,
        zones: vec![ZoneTag::Mid, ZoneTag::Outer],
        min_phase: 2,
        windup_secs: 0.8,
        active_secs: 0.1,
        recovery_secs: 1.2,
        cooldown_secs: 9.0,
        damage: 9,
        hit: HitPolicy::Volley(VolleySpec {
            pattern: VolleyPattern::Ring {
                count: 8,
                ring_radius: 2.5,
                interval_secs: 0.12,
            },
            speed: 7.0,
            lifetime_secs: 6.0,
        }),
        telegraph: true,
        leap: false,
    }
}

fn homing_gout() -> AttackSpec {
    AttackSpec {
        id: AttackId::HomingGout,
        group: AttackGroup::Ranged,
        zones: vec![ZoneTag::Melee, ZoneTag::Mid, ZoneTag::Outer],
        min_phase: 0,
        windup_secs: 0.45,
        active_secs: 0.05,
        recovery_secs: 0.7,
        cooldown_secs: 2.2,
        damage: 8,
        hit: HitPolicy::Volley(VolleySpec {
            pattern: VolleyPattern::Single { homing: true },
            speed: 8.0,
            lifetime_secs: 5.0,
        }),
        telegraph: false,
        leap: false,
    }
}
