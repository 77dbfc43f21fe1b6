//! Attack descriptors and pure selection.
//!
//! An archetype's attack book is an ordered list — earlier entries win when
//! several are eligible. Selection is a pure function of zone, phase,
//! cooldowns, and the alternation gate; execution timing lives in the sim.

use emberfall_core::components::CooldownLedger;
use emberfall_core::enums::{AttackGroup, AttackId, ZoneTag};
use glam::DVec2;

use crate::cooldowns;

/// How an attack's active window detects and applies hits.
#[derive(Debug, Clone, PartialEq)]
pub enum HitPolicy {
    /// One circle overlap check at active-window entry, centered `reach`
    /// units ahead of the attacker.
    Instant { radius: f64, reach: f64 },
    /// One axis-aligned box overlap check at active-window entry.
    InstantBox {
        half_width: f64,
        half_height: f64,
        reach: f64,
    },
    /// Live circle volume for the whole active window. At most one damage
    /// application per target, and the volume disables itself on the first
    /// successful hit.
    Sustained { radius: f64, reach: f64 },
    /// Spawn projectiles at active-window entry.
    Volley(VolleySpec),
}

/// Projectile volley description.
#[derive(Debug, Clone, PartialEq)]
pub struct VolleySpec {
    pub pattern: VolleyPattern,
    pub speed: f64,
    pub lifetime_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VolleyPattern {
    /// One projectile along the facing, optionally homing.
    Single { homing: bool },
    /// `count` projectiles evenly spaced over `arc_radians` centered on the
    /// facing, endpoints inclusive.
    Fan { count: u32, arc_radians: f64 },
    /// `count` homing members spawned one per `interval_secs`, positioned on
    /// a circle of `ring_radius` around the attacker at even angular offsets.
    Ring {
        count: u32,
        ring_radius: f64,
        interval_secs: f64,
    },
}

/// Full description of one attack.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSpec {
    pub id: AttackId,
    pub group: AttackGroup,
    /// Zones from which this attack may be selected.
    pub zones: Vec<ZoneTag>,
    /// Minimum phase index (0 = available from the start).
    pub min_phase: u32,
    pub windup_secs: f64,
    pub active_secs: f64,
    pub recovery_secs: f64,
    pub cooldown_secs: f64,
    pub damage: u32,
    pub hit: HitPolicy,
    /// Windup is driven by a warning-then-strike sequence.
    pub telegraph: bool,
    /// Windup is an airborne prelude with a landing wait.
    pub leap: bool,
}

/// Pick the highest-priority eligible attack, or None if nothing is ready.
///
/// Eligibility: zone listed, phase unlocked, cooldown ready, and — when the
/// archetype forces alternation — a different group than the last committed
/// attack.
pub fn select_attack<'a>(
    book: &'a [AttackSpec],
    zone: ZoneTag,
    phase_index: u32,
    ledger: &CooldownLedger,
    now_tick: u64,
    last_group: Option<AttackGroup>,
    forced_alternation: bool,
) -> Option<&'a AttackSpec> {
    book.iter().find(|spec| {
        spec.zones.contains(&zone)
            && phase_index >= spec.min_phase
            && cooldowns::ready(ledger, spec.id, spec.cooldown_secs, now_tick)
            && !(forced_alternation && last_group == Some(spec.group))
    })
}

/// Unit direction for a heading (0 = North, clockwise).
pub fn heading_dir(heading: f64) -> DVec2 {
    DVec2::new(heading.sin(), heading.cos())
}

/// Directions for a fan volley: `count` headings evenly spaced over
/// `arc_radians` centered on `base_heading`, endpoints inclusive.
pub fn fan_directions(base_heading: f64, arc_radians: f64, count: u32) -> Vec<DVec2> {
    if count <= 1 {
        return vec![heading_dir(base_heading)];
    }
    let start = base_heading - arc_radians / 2.0;
    let step = arc_radians / (count - 1) as f64;
    (0..count)
        .map(|i| heading_dir(start + step * i as f64))
        .collect()
}

/// Outward direction of ring member `index` out of `count`.
pub fn ring_direction(index: u32, count: u32) -> DVec2 {
    let angle = std::f64::consts::TAU * index as f64 / count.max(1) as f64;
    heading_dir(angle)
}
