//! Entity spawn factories and the deferred spawn buffer.
//!
//! Spawn requests raised during a tick are buffered and applied after all
//! systems have run, so a freshly spawned entity never runs a partial first
//! tick inside the pass that created it.

use hecs::World;

use emberfall_core::components::*;
use emberfall_core::constants::*;
use emberfall_core::enums::*;
use emberfall_core::events::CombatEvent;
use emberfall_core::types::{Position, Velocity};
use emberfall_combat_ai::profiles::get_profile;

use crate::encounter::EncounterStats;

/// A spawn request deferred to the end of the tick.
#[derive(Debug, Clone)]
pub enum PendingSpawn {
    Agent {
        archetype: AgentArchetype,
        position: Position,
        /// Override for the starting health (succession); None = full.
        starting_health: Option<u32>,
        /// Set when this spawn continues a dying agent's encounter.
        predecessor: Option<u32>,
    },
    Projectile {
        position: Position,
        velocity: Velocity,
        damage: u32,
        owner: u32,
        owner_faction: Faction,
        policy: MotionPolicy,
        lifetime_secs: f64,
    },
    Ring(RingEmitter),
}

/// Set up the default encounter: hero, arena pillars, and the opening roster.
pub fn setup_encounter(world: &mut World, next_agent_id: &mut u32, now_tick: u64) {
    spawn_hero(world, Position::new(0.0, -20.0));
    spawn_obstacle(world, Position::new(-14.0, 6.0), 1.5);
    spawn_obstacle(world, Position::new(14.0, 6.0), 1.5);

    spawn_agent(
        world,
        next_agent_id,
        AgentArchetype::Thornling,
        Position::new(-18.0, 18.0),
        None,
        now_tick,
    );
    spawn_agent(
        world,
        next_agent_id,
        AgentArchetype::Thornling,
        Position::new(18.0, 18.0),
        None,
        now_tick,
    );
    spawn_agent(
        world,
        next_agent_id,
        AgentArchetype::AshAcolyte,
        Position::new(0.0, 24.0),
        None,
        now_tick,
    );
    spawn_agent(
        world,
        next_agent_id,
        AgentArchetype::EmberTyrant,
        Position::new(0.0, 32.0),
        None,
        now_tick,
    );
}

/// Spawn the player-controlled target.
pub fn spawn_hero(world: &mut World, position: Position) -> hecs::Entity {
    world.spawn((
        Hero,
        position,
        Velocity::default(),
        Collider {
            radius: HERO_RADIUS,
        },
        Health::full(HERO_MAX_HEALTH),
        Faction::Player,
    ))
}

/// Spawn a static sight-blocking pillar.
pub fn spawn_obstacle(world: &mut World, position: Position, radius: f64) -> hecs::Entity {
    world.spawn((Obstacle, position, Collider { radius }, Faction::Neutral))
}

/// Spawn a single agent with its full component bundle. Returns its unit id.
pub fn spawn_agent(
    world: &mut World,
    next_agent_id: &mut u32,
    archetype: AgentArchetype,
    position: Position,
    starting_health: Option<u32>,
    now_tick: u64,
) -> u32 {
    let profile = get_profile(archetype);
    let id = *next_agent_id;
    *next_agent_id += 1;

    let health = match starting_health {
        Some(current) => Health::at(current, profile.max_health),
        None => Health::full(profile.max_health),
    };

    let entity = world.spawn((
        AgentTag { id, archetype },
        Faction::Enemy,
        position,
        Velocity::default(),
        Collider {
            radius: profile.collider_radius,
        },
        health,
        PhaseTrack::new(profile.phase_thresholds.clone()),
        Brain::spawned_at(now_tick),
    ));

    let _ = world.insert(
        entity,
        (
            ZoneTracker::default(),
            CooldownLedger::default(),
            ActiveSequences::default(),
        ),
    );

    if let Some((successor, fraction)) = profile.succession {
        let _ = world.insert_one(
            entity,
            SuccessionPlan {
                archetype: successor,
                starting_fraction: fraction,
                done: false,
            },
        );
    }

    id
}

/// Apply the deferred spawn buffer.
pub fn apply_spawns(
    world: &mut World,
    next_agent_id: &mut u32,
    now_tick: u64,
    spawns: &mut Vec<PendingSpawn>,
    events: &mut Vec<CombatEvent>,
    stats: &mut EncounterStats,
) {
    for spawn in spawns.drain(..) {
        match spawn {
            PendingSpawn::Agent {
                archetype,
                position,
                starting_health,
                predecessor,
            } => {
                let id = spawn_agent(
                    world,
                    next_agent_id,
                    archetype,
                    position,
                    starting_health,
                    now_tick,
                );
                if let Some(predecessor) = predecessor {
                    stats.successors_spawned += 1;
                    events.push(CombatEvent::SuccessorSpawned {
                        predecessor,
                        successor: id,
                        archetype,
                    });
                }
            }
            PendingSpawn::Projectile {
                position,
                velocity,
                damage,
                owner,
                owner_faction,
                policy,
                lifetime_secs,
            } => {
                world.spawn((
                    Projectile {
                        damage,
                        owner,
                        owner_faction,
                        policy,
                        lifetime_remaining_secs: lifetime_secs,
                        resolved: false,
                    },
                    position,
                    velocity,
                ));
            }
            PendingSpawn::Ring(emitter) => {
                world.spawn((emitter,));
            }
        }
    }
}
