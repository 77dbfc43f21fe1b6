//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in the canonical tick order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use emberfall_core::commands::PlayerCommand;
use emberfall_core::components::{AgentTag, Brain, Health, Hero};
use emberfall_core::constants::*;
use emberfall_core::enums::{AlertLevel, GamePhase};
use emberfall_core::events::{Alert, CombatEvent};
use emberfall_core::state::GameStateSnapshot;
use emberfall_core::types::{SimTime, Velocity};
use emberfall_combat_ai::fsm::{self, TransitionOutcome};

use crate::encounter::EncounterStats;
use crate::systems;
use crate::systems::apply_hit;
use crate::world_setup::{self, PendingSpawn};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    next_agent_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    spawn_buffer: Vec<PendingSpawn>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<CombatEvent>,
    alerts: Vec<Alert>,
    stats: EncounterStats,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_agent_id: 1,
            command_queue: VecDeque::new(),
            spawn_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            alerts: Vec::new(),
            stats: EncounterStats::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
            self.check_completion();
        }

        let events = std::mem::take(&mut self.events);
        let alerts = std::mem::take(&mut self.alerts);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.stats,
            events,
            alerts,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartEncounter => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::Complete) {
                    self.world = World::new();
                    self.next_agent_id = 1;
                    self.stats = EncounterStats::default();
                    self.spawn_buffer.clear();
                    self.despawn_buffer.clear();
                    world_setup::setup_encounter(&mut self.world, &mut self.next_agent_id, 0);
                    self.phase = GamePhase::Active;
                    self.time = SimTime::default();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::SetHeroVelocity { vx, vy } => {
                let speed = (vx * vx + vy * vy).sqrt();
                let (vx, vy) = if speed > HERO_MAX_SPEED {
                    let s = HERO_MAX_SPEED / speed;
                    (vx * s, vy * s)
                } else {
                    (vx, vy)
                };
                for (_entity, (_hero, vel, health)) in
                    self.world.query_mut::<(&Hero, &mut Velocity, &Health)>()
                {
                    *vel = if health.dead {
                        Velocity::default()
                    } else {
                        Velocity::new(vx, vy)
                    };
                }
            }
            PlayerCommand::DebugDamage { unit, amount } => match self.find_unit(unit) {
                Some(entity) => {
                    let _ = apply_hit(
                        &mut self.world,
                        entity,
                        None,
                        amount,
                        &mut self.events,
                        &mut self.stats,
                    );
                }
                None => self.alert_unknown_unit(unit),
            },
            PlayerCommand::DebugKill { unit } => match self.find_unit(unit) {
                Some(entity) => {
                    // Forced death path: the kill must land regardless of any
                    // open invulnerability window.
                    if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
                        health.invuln_remaining_secs = 0.0;
                    }
                    let _ = apply_hit(
                        &mut self.world,
                        entity,
                        None,
                        u32::MAX,
                        &mut self.events,
                        &mut self.stats,
                    );
                }
                None => self.alert_unknown_unit(unit),
            },
            PlayerCommand::DebugSetState { unit, state } => match self.find_unit(unit) {
                Some(entity) => {
                    let outcome = self
                        .world
                        .get::<&mut Brain>(entity)
                        .map(|mut brain| fsm::request(&mut brain, state));
                    if matches!(outcome, Ok(TransitionOutcome::RejectedTerminal)) {
                        self.alerts.push(Alert {
                            level: AlertLevel::Warning,
                            message: format!(
                                "unit {unit} is dead; transition to {state:?} rejected"
                            ),
                            tick: self.time.tick,
                        });
                    }
                }
                None => self.alert_unknown_unit(unit),
            },
        }
    }

    fn alert_unknown_unit(&mut self, unit: u32) {
        self.alerts.push(Alert {
            level: AlertLevel::Warning,
            message: format!("no such unit: {unit}"),
            tick: self.time.tick,
        });
    }

    fn find_unit(&self, unit: u32) -> Option<hecs::Entity> {
        if unit == HERO_ID {
            self.world.query::<&Hero>().iter().next().map(|(e, _)| e)
        } else {
            self.world
                .query::<&AgentTag>()
                .iter()
                .find(|(_, tag)| tag.id == unit)
                .map(|(e, _)| e)
        }
    }

    /// Run all systems in the canonical order: timers, vitality, zones,
    /// brain, projectiles, movement, succession, cleanup, deferred spawns.
    fn run_systems(&mut self) {
        systems::timers::run(&mut self.world, &mut self.events);
        systems::vitality::run(&mut self.world, &mut self.events);
        systems::zones::run(&mut self.world, self.time.tick);
        systems::brain::run(
            &mut self.world,
            &mut self.rng,
            self.time.tick,
            &mut self.events,
            &mut self.alerts,
            &mut self.spawn_buffer,
            &mut self.stats,
        );
        systems::projectiles::run(
            &mut self.world,
            &mut self.events,
            &mut self.spawn_buffer,
            &mut self.stats,
        );
        systems::movement::run(&mut self.world);
        systems::succession::run(&mut self.world, &mut self.spawn_buffer);
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // Spawns raised this tick land only now, so a fresh successor never
        // runs a partial first tick inside the pass that killed its
        // predecessor.
        world_setup::apply_spawns(
            &mut self.world,
            &mut self.next_agent_id,
            self.time.tick,
            &mut self.spawn_buffer,
            &mut self.events,
            &mut self.stats,
        );
    }

    /// The encounter completes when the hero falls, or when every agent and
    /// pending successor is gone (provided a roster ever existed).
    fn check_completion(&mut self) {
        let hero_dead = self
            .world
            .query::<(&Hero, &Health)>()
            .iter()
            .next()
            .map(|(_, (_, health))| health.dead)
            .unwrap_or(false);
        if hero_dead {
            self.phase = GamePhase::Complete;
            return;
        }

        if self.next_agent_id > 1 {
            let agents = self.world.query::<&AgentTag>().iter().count();
            if agents == 0 {
                self.phase = GamePhase::Complete;
            }
        }
    }

    // --- Test support ---

    /// Start with an empty arena containing only the hero (for tests that
    /// stage their own roster).
    #[cfg(test)]
    pub fn start_bare(&mut self) {
        self.world = World::new();
        self.next_agent_id = 1;
        self.stats = EncounterStats::default();
        self.spawn_buffer.clear();
        self.despawn_buffer.clear();
        world_setup::spawn_hero(
            &mut self.world,
            emberfall_core::types::Position::new(0.0, 0.0),
        );
        self.phase = GamePhase::Active;
        self.time = SimTime::default();
    }

    /// Spawn an agent immediately (not deferred). Returns its unit id.
    #[cfg(test)]
    pub fn spawn_test_agent(
        &mut self,
        archetype: emberfall_core::enums::AgentArchetype,
        position: emberfall_core::types::Position,
    ) -> u32 {
        world_setup::spawn_agent(
            &mut self.world,
            &mut self.next_agent_id,
            archetype,
            position,
            None,
            self.time.tick,
        )
    }

    /// Spawn a straight enemy projectile immediately.
    #[cfg(test)]
    pub fn spawn_test_projectile(
        &mut self,
        position: emberfall_core::types::Position,
        velocity: Velocity,
        damage: u32,
        lifetime_secs: f64,
    ) {
        self.world.spawn((
            emberfall_core::components::Projectile {
                damage,
                owner: 99,
                owner_faction: emberfall_core::enums::Faction::Enemy,
                policy: emberfall_core::components::MotionPolicy::Straight,
                lifetime_remaining_secs: lifetime_secs,
                resolved: false,
            },
            position,
            velocity,
        ));
    }

    /// Spawn a ring emitter immediately.
    #[cfg(test)]
    pub fn spawn_test_ring(&mut self, emitter: emberfall_core::components::RingEmitter) {
        self.world.spawn((emitter,));
    }

    /// Spawn a sight-blocking pillar immediately.
    #[cfg(test)]
    pub fn spawn_test_obstacle(
        &mut self,
        position: emberfall_core::types::Position,
        radius: f64,
    ) {
        world_setup::spawn_obstacle(&mut self.world, position, radius);
    }

    /// Spawn a second Player-faction unit so one projectile pass can report
    /// multiple overlapping contacts. Returns its unit id.
    #[cfg(test)]
    pub fn spawn_test_player_decoy(
        &mut self,
        position: emberfall_core::types::Position,
    ) -> u32 {
        let id = self.next_agent_id;
        self.next_agent_id += 1;
        self.world.spawn((
            AgentTag {
                id,
                archetype: emberfall_core::enums::AgentArchetype::Thornling,
            },
            emberfall_core::enums::Faction::Player,
            position,
            emberfall_core::components::Collider { radius: 0.6 },
            Health::full(100),
        ));
        id
    }
}
