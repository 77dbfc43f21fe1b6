//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot. Read-only — never modifies the world.

use hecs::World;

use emberfall_core::components::*;
use emberfall_core::enums::GamePhase;
use emberfall_core::events::{Alert, CombatEvent};
use emberfall_core::state::*;
use emberfall_core::types::{Position, SimTime, Velocity};

use crate::encounter::EncounterStats;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    stats: &EncounterStats,
    events: Vec<CombatEvent>,
    alerts: Vec<Alert>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        hero: build_hero(world),
        agents: build_agents(world),
        projectiles: build_projectiles(world),
        stats: stats.view(),
        events,
        alerts,
    }
}

fn build_hero(world: &World) -> HeroView {
    world
        .query::<(&Hero, &Position, &Velocity, &Health)>()
        .iter()
        .next()
        .map(|(_, (_, pos, vel, health))| HeroView {
            position: *pos,
            velocity: *vel,
            health_current: health.current,
            health_max: health.max,
            invulnerable: health.is_invulnerable(),
            dead: health.dead,
        })
        .unwrap_or_default()
}

fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(
            &AgentTag,
            &Position,
            &Brain,
            &Health,
            &ZoneTracker,
            &PhaseTrack,
            Option<&AttackRuntime>,
        )>()
        .iter()
        .map(|(_, (tag, pos, brain, health, tracker, track, runtime))| AgentView {
            id: tag.id,
            archetype: tag.archetype,
            position: *pos,
            facing: brain.facing,
            state: brain.state,
            zone: tracker.current,
            phase_index: track.index(),
            health_current: health.current,
            health_max: health.max,
            invulnerable: health.is_invulnerable(),
            flash: brain.flash_active,
            attack: runtime.and_then(|r| r.attack),
            attack_stage: runtime.and_then(|r| r.attack.map(|_| r.stage)),
        })
        .collect();

    agents.sort_by_key(|a| a.id);
    agents
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (projectile, pos, vel))| ProjectileView {
            position: *pos,
            velocity: *vel,
            homing: matches!(projectile.policy, MotionPolicy::Homing { .. }),
        })
        .collect()
}
