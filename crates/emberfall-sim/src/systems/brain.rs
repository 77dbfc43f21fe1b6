//! Brain dispatch — the per-agent behavior system.
//!
//! Runs in four passes, each collecting before mutating to respect hecs
//! borrow rules: commit pending transitions (with their exit/enter effects),
//! refresh target perception, progress executing attacks through
//! windup/active/recovery, then steer each agent and evaluate the transition
//! policy for the next tick.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use emberfall_core::components::{
    ActiveSequences, AgentTag, AttackRuntime, Brain, Collider, LeapMotion, PhaseTrack, ZoneTracker,
};
use emberfall_core::components::{CooldownLedger, Health, MotionPolicy, RingEmitter};
use emberfall_core::constants::*;
use emberfall_core::enums::*;
use emberfall_core::events::{Alert, CombatEvent};
use emberfall_core::types::{Position, Velocity};
use emberfall_combat_ai::attacks::{self, AttackSpec, HitPolicy, VolleyPattern};
use emberfall_combat_ai::profiles::{attack_book, attack_spec, get_profile};
use emberfall_combat_ai::{cooldowns, fsm, sequence, zones};

use crate::encounter::EncounterStats;
use crate::spatial::{self, FactionFilter, UnitRef};
use crate::systems::apply_hit;
use crate::world_setup::PendingSpawn;

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    now_tick: u64,
    events: &mut Vec<CombatEvent>,
    alerts: &mut Vec<Alert>,
    spawns: &mut Vec<PendingSpawn>,
    stats: &mut EncounterStats,
) {
    let units = spatial::collect_units(world);
    commit_transitions(world, rng, &units, now_tick, events, alerts);
    perceive(world, &units);
    progress_attacks(world, &units, now_tick, events, spawns, stats);
    steer_and_decide(world, rng, &units, now_tick);
}

// --- Transition commit ---

fn commit_transitions(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    units: &[UnitRef],
    now_tick: u64,
    events: &mut Vec<CombatEvent>,
    alerts: &mut Vec<Alert>,
) {
    let mut committed: Vec<(Entity, BehaviorState, BehaviorState)> = Vec::new();
    for (entity, brain) in world.query_mut::<&mut Brain>() {
        if let Some((from, to)) = fsm::commit(brain, now_tick) {
            committed.push((entity, from, to));
        }
    }

    for (entity, from, to) in committed {
        // Exit: state-scoped sequences die with their state; the orthogonal
        // damage flash survives.
        if let Ok(mut seqs) = world.get::<&mut ActiveSequences>(entity) {
            sequence::cancel_scoped(&mut seqs, from);
        }
        if from == BehaviorState::Attack {
            // Removing the runtime cancels any remaining stage of the swing.
            if let Ok(runtime) = world.remove_one::<AttackRuntime>(entity) {
                if let Some(attack) = runtime.attack {
                    if let Ok(tag) = world.get::<&AgentTag>(entity) {
                        events.push(CombatEvent::AttackEnded {
                            unit: tag.id,
                            attack,
                        });
                    }
                }
            }
        }

        match to {
            BehaviorState::Attack => enter_attack(world, units, entity, now_tick, events, alerts),
            BehaviorState::Defend => enter_defend(world, units, entity),
            BehaviorState::Patrol => {
                if let Ok(mut brain) = world.get::<&mut Brain>(entity) {
                    brain.patrol_goal = Some(fsm::roll_patrol_goal(rng));
                    brain.patrol_retarget_secs = PATROL_RETARGET_SECS;
                }
            }
            BehaviorState::Death => {
                halt(world, entity);
                if let Ok(mut seqs) = world.get::<&mut ActiveSequences>(entity) {
                    seqs.list.push(sequence::death_fade());
                }
            }
            BehaviorState::Idle | BehaviorState::Hurt => halt(world, entity),
            BehaviorState::React => {}
        }
    }
}

fn halt(world: &mut World, entity: Entity) {
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        *vel = Velocity::default();
    }
}

fn enter_attack(
    world: &mut World,
    units: &[UnitRef],
    entity: Entity,
    now_tick: u64,
    events: &mut Vec<CombatEvent>,
    alerts: &mut Vec<Alert>,
) {
    let (id, archetype) = match world.get::<&AgentTag>(entity) {
        Ok(tag) => (tag.id, tag.archetype),
        Err(_) => return,
    };
    let (queued, target) = match world.get::<&mut Brain>(entity) {
        Ok(mut brain) => (brain.queued_attack.take(), brain.target),
        Err(_) => return,
    };

    let spec = queued.and_then(|attack| attack_spec(archetype, attack));
    let Some(spec) = spec else {
        // Missing collaborator: degrade to a no-op tick and fall back out.
        alerts.push(Alert {
            level: AlertLevel::Warning,
            message: format!("unit {id} entered Attack with nothing queued"),
            tick: now_tick,
        });
        if let Ok(mut brain) = world.get::<&mut Brain>(entity) {
            let _ = fsm::request(&mut brain, BehaviorState::React);
        }
        return;
    };

    let mut runtime = AttackRuntime::begin(spec.id, now_tick);
    events.push(CombatEvent::AttackStarted {
        unit: id,
        attack: spec.id,
    });

    if spec.leap {
        runtime.leap = Some(LeapMotion::launched(now_tick, LEAP_VERTICAL_SPEED));
        // Dash at the target's position at launch; commit to it blind.
        let dash = target
            .and_then(|t| spatial::find_unit(units, t))
            .filter(|u| u.alive)
            .and_then(|u| {
                let pos = world.get::<&Position>(entity).ok()?;
                Some(Velocity::from_heading(
                    pos.bearing_to(&u.position),
                    LEAP_DASH_SPEED,
                ))
            })
            .unwrap_or_default();
        if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
            *vel = dash;
        }
        if let Ok(mut seqs) = world.get::<&mut ActiveSequences>(entity) {
            seqs.list.push(sequence::leap_windup());
        }
    } else {
        halt(world, entity);
        if spec.telegraph {
            if let Ok(mut seqs) = world.get::<&mut ActiveSequences>(entity) {
                seqs.list
                    .push(sequence::telegraph_windup(spec.id, spec.windup_secs));
            }
        }
    }

    let _ = world.insert_one(entity, runtime);
}

fn enter_defend(world: &mut World, units: &[UnitRef], entity: Entity) {
    let hop = {
        let brain = match world.get::<&Brain>(entity) {
            Ok(b) => b,
            Err(_) => return,
        };
        let pos = match world.get::<&Position>(entity) {
            Ok(p) => *p,
            Err(_) => return,
        };
        brain
            .target
            .and_then(|t| spatial::find_unit(units, t))
            .map(|u| {
                // Hop directly away from the target.
                let away = u.position.bearing_to(&pos);
                Velocity::from_heading(away, DEFEND_HOP_SPEED)
            })
            .unwrap_or_default()
    };
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        *vel = hop;
    }
    if let Ok(mut tracker) = world.get::<&mut ZoneTracker>(entity) {
        tracker.dwell_flag_consumed = true;
    }
}

// --- Perception ---

/// Acquire and drop targets. Acquisition needs the hostile unit inside the
/// aggro radius with a clear sight line; a held target survives out to
/// `aggro * TARGET_DROP_FACTOR` and is dropped on death.
fn perceive(world: &mut World, units: &[UnitRef]) {
    let mut changes: Vec<(Entity, Option<u32>)> = Vec::new();

    for (entity, (tag, pos, brain, health)) in world
        .query::<(&AgentTag, &Position, &Brain, &Health)>()
        .iter()
    {
        if health.dead || brain.state == BehaviorState::Death {
            continue;
        }
        let profile = get_profile(tag.archetype);

        match brain.target {
            Some(id) => {
                let keep = spatial::find_unit(units, id)
                    .filter(|u| u.alive)
                    .map(|u| pos.range_to(&u.position) <= profile.aggro_radius * TARGET_DROP_FACTOR)
                    .unwrap_or(false);
                if !keep {
                    changes.push((entity, None));
                }
            }
            None => {
                let candidate = units
                    .iter()
                    .filter(|u| u.alive && u.faction == Faction::Player)
                    .map(|u| (u, pos.range_to(&u.position)))
                    .filter(|(_, d)| *d <= profile.aggro_radius)
                    .min_by(|a, b| a.1.total_cmp(&b.1));
                if let Some((unit, _)) = candidate {
                    if spatial::los_clear(world, pos, &unit.position) {
                        changes.push((entity, Some(unit.id)));
                    }
                }
            }
        }
    }

    for (entity, target) in changes {
        if let Ok(mut brain) = world.get::<&mut Brain>(entity) {
            brain.target = target;
        }
    }
}

// --- Attack progression ---

/// One agent's attack-stage resolution for this tick, collected read-only and
/// applied afterwards.
struct AttackUpdate {
    entity: Entity,
    id: u32,
    new_stage: Option<AttackStage>,
    /// Stamped at Active entry, never later.
    stamp: Option<(AttackId, AttackGroup)>,
    leap: Option<LeapMotion>,
    halt_on_landing: bool,
    /// Candidate victims of a discrete overlap check; all are applied.
    instant_hits: Vec<Entity>,
    /// Candidate victims of a live volume, nearest first; applied until the
    /// first successful hit disables the volume.
    sustained_hits: Vec<Entity>,
    open_volume: bool,
    damage: u32,
    volley: Vec<PendingSpawn>,
    launched: Option<AttackId>,
}

fn progress_attacks(
    world: &mut World,
    units: &[UnitRef],
    now_tick: u64,
    events: &mut Vec<CombatEvent>,
    spawns: &mut Vec<PendingSpawn>,
    stats: &mut EncounterStats,
) {
    let mut updates: Vec<AttackUpdate> = Vec::new();

    for (entity, (tag, pos, collider, brain, runtime, faction)) in world
        .query::<(
            &AgentTag,
            &Position,
            &Collider,
            &Brain,
            &AttackRuntime,
            &Faction,
        )>()
        .iter()
    {
        if brain.state != BehaviorState::Attack {
            continue;
        }
        let Some(spec) = runtime.attack.and_then(|a| attack_spec(tag.archetype, a)) else {
            continue;
        };

        let mut upd = AttackUpdate {
            entity,
            id: tag.id,
            new_stage: None,
            stamp: None,
            leap: None,
            halt_on_landing: false,
            instant_hits: Vec::new(),
            sustained_hits: Vec::new(),
            open_volume: false,
            damage: spec.damage,
            volley: Vec::new(),
            launched: None,
        };

        let elapsed = now_tick.saturating_sub(runtime.stage_entered_tick) as f64 * DT;
        // Aim at the live target if it still exists, else hold the last facing.
        let aim = brain
            .target
            .and_then(|t| spatial::find_unit(units, t))
            .filter(|u| u.alive)
            .map(|u| pos.bearing_to(&u.position))
            .unwrap_or(brain.facing);

        match runtime.stage {
            AttackStage::Windup => {
                if let Some(mut leap) = runtime.leap {
                    if !leap.landed() {
                        integrate_leap(&mut leap);
                        if leap.landed() {
                            upd.halt_on_landing = true;
                        }
                        upd.leap = Some(leap);
                    }
                }

                // Sequence-driven windups release through BeginStrike; plain
                // windups release on their timer.
                let released = if spec.telegraph || spec.leap {
                    runtime.strike_released
                } else {
                    elapsed >= spec.windup_secs
                };
                if released {
                    upd.new_stage = Some(AttackStage::Active);
                    upd.stamp = Some((spec.id, spec.group));
                    strike(
                        world, units, pos, collider, *faction, aim, &spec, runtime, tag.id,
                        &mut upd,
                    );
                }
            }
            AttackStage::Active => {
                if let HitPolicy::Sustained { radius, reach } = spec.hit {
                    if runtime.volume_live {
                        upd.sustained_hits =
                            volume_candidates(world, pos, aim, radius, reach, *faction, runtime);
                    }
                }
                if elapsed >= spec.active_secs {
                    upd.new_stage = Some(AttackStage::Recovery);
                }
            }
            AttackStage::Recovery => {}
        }

        updates.push(upd);
    }

    for upd in updates {
        if let Ok(mut runtime) = world.get::<&mut AttackRuntime>(upd.entity) {
            if let Some(leap) = upd.leap {
                runtime.leap = Some(leap);
            }
            if let Some(stage) = upd.new_stage {
                runtime.stage = stage;
                runtime.stage_entered_tick = now_tick;
            }
            if upd.open_volume {
                runtime.volume_live = true;
            }
        }
        if upd.halt_on_landing {
            halt(world, upd.entity);
        }

        // Cooldowns measure from attack commitment, not recovery end.
        if let Some((attack, group)) = upd.stamp {
            let stamped = world
                .get::<&AttackRuntime>(upd.entity)
                .map(|r| r.cooldown_stamped)
                .unwrap_or(true);
            if !stamped {
                if let Ok(mut ledger) = world.get::<&mut CooldownLedger>(upd.entity) {
                    cooldowns::stamp(&mut ledger, attack, now_tick);
                }
                if let Ok(mut brain) = world.get::<&mut Brain>(upd.entity) {
                    brain.last_attack_group = Some(group);
                }
                if let Ok(mut runtime) = world.get::<&mut AttackRuntime>(upd.entity) {
                    runtime.cooldown_stamped = true;
                }
            }
        }

        for target in upd.instant_hits {
            let _ = apply_hit(world, target, Some(upd.id), upd.damage, events, stats);
        }

        for target in upd.sustained_hits {
            let outcome = apply_hit(world, target, Some(upd.id), upd.damage, events, stats);
            if let emberfall_combat_ai::health::DamageOutcome::Applied { .. } = outcome {
                // First successful hit closes the volume.
                let struck_id = unit_id_of(world, target);
                if let Ok(mut runtime) = world.get::<&mut AttackRuntime>(upd.entity) {
                    runtime.volume_live = false;
                    if let Some(id) = struck_id {
                        runtime.struck.push(id);
                    }
                }
                break;
            }
        }

        if let Some(attack) = upd.launched {
            events.push(CombatEvent::ProjectileLaunched {
                unit: upd.id,
                attack,
            });
        }
        spawns.extend(upd.volley);
    }
}

/// Resolve the hit policy at active-window entry.
#[allow(clippy::too_many_arguments)]
fn strike(
    world: &World,
    units: &[UnitRef],
    pos: &Position,
    collider: &Collider,
    faction: Faction,
    aim: f64,
    spec: &AttackSpec,
    runtime: &AttackRuntime,
    id: u32,
    upd: &mut AttackUpdate,
) {
    match &spec.hit {
        HitPolicy::Instant { radius, reach } => {
            let center = point_ahead(pos, aim, *reach);
            upd.instant_hits = spatial::query_circle(
                world,
                center,
                *radius,
                FactionFilter::HostileTo(faction),
            )
            .into_iter()
            .map(|h| h.entity)
            .collect();
        }
        HitPolicy::InstantBox {
            half_width,
            half_height,
            reach,
        } => {
            let center = point_ahead(pos, aim, *reach);
            upd.instant_hits = spatial::query_box(
                world,
                center,
                *half_width,
                *half_height,
                FactionFilter::HostileTo(faction),
            )
            .into_iter()
            .map(|h| h.entity)
            .collect();
        }
        HitPolicy::Sustained { radius, reach } => {
            upd.open_volume = true;
            upd.sustained_hits =
                volume_candidates(world, pos, aim, *radius, *reach, faction, runtime);
        }
        HitPolicy::Volley(volley) => {
            upd.launched = Some(spec.id);
            let owner_target = units
                .iter()
                .find(|u| u.faction == Faction::Player && u.alive)
                .map(|u| u.id);
            let launch_offset = collider.radius + PROJECTILE_RADIUS;
            match volley.pattern {
                VolleyPattern::Single { homing } => {
                    let dir = attacks::heading_dir(aim);
                    upd.volley.push(PendingSpawn::Projectile {
                        position: offset(pos, dir, launch_offset),
                        velocity: Velocity::from_dvec2(dir * volley.speed),
                        damage: spec.damage,
                        owner: id,
                        owner_faction: faction,
                        policy: if homing {
                            MotionPolicy::Homing {
                                target: owner_target,
                                turn_rate: HOMING_TURN_RATE,
                            }
                        } else {
                            MotionPolicy::Straight
                        },
                        lifetime_secs: volley.lifetime_secs,
                    });
                }
                VolleyPattern::Fan {
                    count,
                    arc_radians,
                } => {
                    for dir in attacks::fan_directions(aim, arc_radians, count) {
                        upd.volley.push(PendingSpawn::Projectile {
                            position: offset(pos, dir, launch_offset),
                            velocity: Velocity::from_dvec2(dir * volley.speed),
                            damage: spec.damage,
                            owner: id,
                            owner_faction: faction,
                            policy: MotionPolicy::Straight,
                            lifetime_secs: volley.lifetime_secs,
                        });
                    }
                }
                VolleyPattern::Ring {
                    count,
                    ring_radius,
                    interval_secs,
                } => {
                    upd.volley.push(PendingSpawn::Ring(RingEmitter {
                        center: *pos,
                        count,
                        spawned: 0,
                        ring_radius,
                        interval_secs,
                        next_spawn_in_secs: 0.0,
                        member_speed: volley.speed,
                        damage: spec.damage,
                        owner: id,
                        owner_faction: faction,
                        target: owner_target,
                    }));
                }
            }
        }
    }
}

/// Victims inside a live volume that have not already been struck this swing.
fn volume_candidates(
    world: &World,
    pos: &Position,
    aim: f64,
    radius: f64,
    reach: f64,
    faction: Faction,
    runtime: &AttackRuntime,
) -> Vec<Entity> {
    let center = point_ahead(pos, aim, reach);
    spatial::query_circle(world, center, radius, FactionFilter::HostileTo(faction))
        .into_iter()
        .filter(|h| {
            unit_id_of(world, h.entity)
                .map(|id| !runtime.struck.contains(&id))
                .unwrap_or(false)
        })
        .map(|h| h.entity)
        .collect()
}

fn unit_id_of(world: &World, entity: Entity) -> Option<u32> {
    if world.get::<&emberfall_core::components::Hero>(entity).is_ok() {
        return Some(HERO_ID);
    }
    world.get::<&AgentTag>(entity).map(|tag| tag.id).ok()
}

fn point_ahead(pos: &Position, heading: f64, reach: f64) -> Position {
    let dir = attacks::heading_dir(heading);
    offset(pos, dir, reach)
}

fn offset(pos: &Position, dir: glam::DVec2, by: f64) -> Position {
    Position::new(pos.x + dir.x * by, pos.y + dir.y * by)
}

/// Ballistic height integration for an airborne attack prelude.
pub(crate) fn integrate_leap(leap: &mut LeapMotion) {
    leap.vertical_vel -= LEAP_GRAVITY * DT;
    leap.height = (leap.height + leap.vertical_vel * DT).max(0.0);
}

// --- Steering & transition policy ---

fn steer_and_decide(world: &mut World, rng: &mut ChaCha8Rng, units: &[UnitRef], now_tick: u64) {
    for (_entity, (tag, brain, pos, vel, health, tracker, ledger, track, runtime)) in world
        .query_mut::<(
            &AgentTag,
            &mut Brain,
            &Position,
            &mut Velocity,
            &Health,
            &ZoneTracker,
            &CooldownLedger,
            &PhaseTrack,
            Option<&AttackRuntime>,
        )>()
    {
        if health.dead && brain.state != BehaviorState::Death {
            // Vitality has the Death request pending; freeze until it lands.
            *vel = Velocity::default();
            continue;
        }

        let profile = get_profile(tag.archetype);
        let target = brain
            .target
            .and_then(|t| spatial::find_unit(units, t))
            .filter(|u| u.alive);

        let mut attack_ready = false;
        let mut attack_finished = false;
        let mut dwell_escalate = false;

        match brain.state {
            BehaviorState::Idle => {
                *vel = Velocity::default();
            }
            BehaviorState::Patrol => {
                brain.patrol_retarget_secs -= DT;
                let arrived = brain
                    .patrol_goal
                    .map(|g| pos.range_to(&g) <= PATROL_ARRIVE_RANGE)
                    .unwrap_or(true);
                if arrived || brain.patrol_retarget_secs <= 0.0 {
                    brain.patrol_goal = Some(fsm::roll_patrol_goal(rng));
                    brain.patrol_retarget_secs = PATROL_RETARGET_SECS;
                }
                if let Some(goal) = brain.patrol_goal {
                    brain.facing = pos.bearing_to(&goal);
                    *vel = Velocity::from_heading(
                        brain.facing,
                        profile.move_speed * PATROL_SPEED_FACTOR,
                    );
                }
            }
            BehaviorState::React => {
                if let Some(unit) = target {
                    let distance = pos.range_to(&unit.position);
                    brain.facing = pos.bearing_to(&unit.position);

                    match profile.preferred_range {
                        // Kite around the preferred range.
                        Some(preferred) => {
                            let band = preferred * KITE_BAND_FACTOR;
                            if distance > preferred + band {
                                *vel = Velocity::from_heading(brain.facing, profile.move_speed);
                            } else if distance < preferred - band {
                                let away = unit.position.bearing_to(pos);
                                *vel = Velocity::from_heading(away, profile.move_speed);
                            } else {
                                *vel = Velocity::default();
                            }
                        }
                        // Close to melee standoff.
                        None => {
                            let standoff =
                                profile.collider_radius + unit.radius + MELEE_STANDOFF;
                            if distance > standoff {
                                *vel = Velocity::from_heading(brain.facing, profile.move_speed);
                            } else {
                                *vel = Velocity::default();
                            }
                        }
                    }

                    let book = attack_book(tag.archetype);
                    let pick = attacks::select_attack(
                        &book,
                        tracker.current,
                        track.index(),
                        ledger,
                        now_tick,
                        brain.last_attack_group,
                        profile.forced_alternation,
                    );
                    brain.queued_attack = pick.map(|s| s.id);
                    attack_ready = pick.is_some();

                    if !attack_ready {
                        if let Some(limit) = profile.melee_dwell_escalate_secs {
                            dwell_escalate = tracker.current == ZoneTag::Melee
                                && !tracker.dwell_flag_consumed
                                && zones::dwell_secs(tracker, ZoneTag::Melee, now_tick) >= limit;
                        }
                    }
                } else {
                    *vel = Velocity::default();
                }
            }
            BehaviorState::Attack => {
                let dashing = runtime
                    .and_then(|r| r.leap)
                    .map(|leap| !leap.landed())
                    .unwrap_or(false);
                if !dashing {
                    *vel = Velocity::default();
                }
                attack_finished = runtime
                    .and_then(|r| {
                        let spec = r.attack.and_then(|a| attack_spec(tag.archetype, a))?;
                        let elapsed =
                            now_tick.saturating_sub(r.stage_entered_tick) as f64 * DT;
                        Some(r.stage == AttackStage::Recovery && elapsed >= spec.recovery_secs)
                    })
                    .unwrap_or(true);
            }
            // Defend keeps the hop velocity set at entry.
            BehaviorState::Defend => {}
            BehaviorState::Hurt => {
                *vel = Velocity::default();
            }
            BehaviorState::Death => {
                *vel = Velocity::default();
            }
        }

        let ctx = fsm::DecisionContext {
            state: brain.state,
            has_target: target.is_some(),
            attack_ready,
            attack_finished,
            stagger_done: brain.stagger_remaining_secs <= 0.0,
            dwell_escalate,
            patrols: profile.patrols,
            time_in_state_secs: fsm::time_in_state(brain, now_tick),
        };
        if let Some(next) = fsm::next_state(&ctx) {
            let _ = fsm::request(brain, next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_arc_lands_after_apex() {
        let mut leap = LeapMotion::launched(0, LEAP_VERTICAL_SPEED);
        assert!(!leap.landed(), "fresh launch is airborne");

        let mut peak = 0.0f64;
        let mut ticks = 0u32;
        while !leap.landed() {
            integrate_leap(&mut leap);
            peak = peak.max(leap.height);
            ticks += 1;
            assert!(ticks < 1000, "leap never landed");
        }

        // v/g up, same down: 2 * 9/30 = 0.6 s of air time.
        let expected_ticks = (2.0 * LEAP_VERTICAL_SPEED / LEAP_GRAVITY / DT).round() as u32;
        assert!(
            (ticks as i64 - expected_ticks as i64).abs() <= 2,
            "air time {ticks} ticks, expected about {expected_ticks}"
        );
        assert!(peak > 0.0);
    }

    #[test]
    fn test_point_ahead_follows_heading() {
        let origin = Position::new(1.0, 1.0);
        // North
        let p = point_ahead(&origin, 0.0, 2.0);
        assert!((p.x - 1.0).abs() < 1e-9 && (p.y - 3.0).abs() < 1e-9);
        // East
        let p = point_ahead(&origin, std::f64::consts::FRAC_PI_2, 2.0);
        assert!((p.x - 3.0).abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9);
    }
}
