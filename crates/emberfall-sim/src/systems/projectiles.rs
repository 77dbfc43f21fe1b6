//! Projectile flight and contact resolution.
//!
//! Ring emitters release their members on a stagger timer, homing members
//! steer with a bounded turn rate, and contacts resolve at most once per
//! projectile: the first qualifying contact applies damage, marks the
//! projectile resolved, and cleanup removes it within the same tick.

use glam::DVec2;
use hecs::{Entity, World};

use emberfall_core::components::{MotionPolicy, Projectile, RingEmitter};
use emberfall_core::constants::*;
use emberfall_core::events::CombatEvent;
use emberfall_core::types::{Position, Velocity};
use emberfall_combat_ai::attacks;

use crate::encounter::EncounterStats;
use crate::spatial::{self, UnitRef};
use crate::systems::apply_hit;
use crate::world_setup::PendingSpawn;

pub fn run(
    world: &mut World,
    events: &mut Vec<CombatEvent>,
    spawns: &mut Vec<PendingSpawn>,
    stats: &mut EncounterStats,
) {
    let units = spatial::collect_units(world);

    run_emitters(world, spawns);
    steer_homing_members(world, &units);

    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.lifetime_remaining_secs -= DT;
    }

    resolve_contacts(world, &units, events, stats);
}

/// Release ring members one per interval at even angular offsets around the
/// emitter's center. Spent emitters are removed by cleanup.
fn run_emitters(world: &mut World, spawns: &mut Vec<PendingSpawn>) {
    for (_entity, emitter) in world.query_mut::<&mut RingEmitter>() {
        emitter.next_spawn_in_secs -= DT;
        while emitter.next_spawn_in_secs <= 0.0 && emitter.spawned < emitter.count {
            let dir = attacks::ring_direction(emitter.spawned, emitter.count);
            let position = Position::new(
                emitter.center.x + dir.x * emitter.ring_radius,
                emitter.center.y + dir.y * emitter.ring_radius,
            );
            // Members bloom outward; homing bends them back in.
            spawns.push(PendingSpawn::Projectile {
                position,
                velocity: Velocity::from_dvec2(dir * emitter.member_speed),
                damage: emitter.damage,
                owner: emitter.owner,
                owner_faction: emitter.owner_faction,
                policy: MotionPolicy::Homing {
                    target: emitter.target,
                    turn_rate: HOMING_TURN_RATE,
                },
                lifetime_secs: PROJECTILE_LIFETIME_SECS,
            });
            emitter.spawned += 1;
            emitter.next_spawn_in_secs += emitter.interval_secs;
        }
    }
}

fn steer_homing_members(world: &mut World, units: &[UnitRef]) {
    for (_entity, (projectile, pos, vel)) in
        world.query_mut::<(&Projectile, &Position, &mut Velocity)>()
    {
        if projectile.resolved {
            continue;
        }
        if let MotionPolicy::Homing { target, turn_rate } = projectile.policy {
            let chased = target
                .and_then(|id| spatial::find_unit(units, id))
                .filter(|u| u.alive);
            // Flies straight once the target is gone.
            if let Some(unit) = chased {
                *vel = steer_homing(*vel, pos, &unit.position, turn_rate, DT);
            }
        }
    }
}

/// Blend velocity toward the target at a bounded turn rate, preserving speed.
pub(crate) fn steer_homing(
    vel: Velocity,
    pos: &Position,
    target: &Position,
    turn_rate: f64,
    dt: f64,
) -> Velocity {
    let speed = vel.speed();
    if speed < 1e-9 {
        return vel;
    }
    let to_target = target.as_dvec2() - pos.as_dvec2();
    if to_target.length_squared() < 1e-12 {
        return vel;
    }

    let current = vel.as_dvec2() / speed;
    let desired = to_target.normalize();

    // Signed angle from current to desired, clamped to this tick's budget.
    let angle = current.perp_dot(desired).atan2(current.dot(desired));
    let turn = angle.clamp(-turn_rate * dt, turn_rate * dt);
    let (sin, cos) = turn.sin_cos();
    let rotated = DVec2::new(
        current.x * cos - current.y * sin,
        current.x * sin + current.y * cos,
    );
    Velocity::from_dvec2(rotated * speed)
}

/// Apply the first qualifying contact per projectile. The resolved flag makes
/// resolution idempotent even if a projectile shows up with several
/// overlapping contacts in one pass.
fn resolve_contacts(
    world: &mut World,
    units: &[UnitRef],
    events: &mut Vec<CombatEvent>,
    stats: &mut EncounterStats,
) {
    let mut contacts: Vec<(Entity, Entity, u32, u32)> = Vec::new();

    for (entity, (projectile, pos)) in world.query::<(&Projectile, &Position)>().iter() {
        if projectile.resolved {
            continue;
        }
        let victim = units
            .iter()
            .filter(|u| {
                u.alive && projectile.owner_faction.hostile_to() == Some(u.faction)
            })
            .map(|u| (u, pos.range_to(&u.position)))
            .filter(|(u, d)| *d <= PROJECTILE_RADIUS + u.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((unit, _)) = victim {
            contacts.push((entity, unit.entity, projectile.damage, projectile.owner));
        }
    }

    for (entity, target, damage, owner) in contacts {
        {
            let mut projectile = match world.get::<&mut Projectile>(entity) {
                Ok(p) => p,
                Err(_) => continue,
            };
            if projectile.resolved {
                continue;
            }
            projectile.resolved = true;
        }
        // The projectile is consumed on contact even if the target's
        // invulnerability window swallows the damage.
        let _ = apply_hit(world, target, Some(owner), damage, events, stats);
    }
}
