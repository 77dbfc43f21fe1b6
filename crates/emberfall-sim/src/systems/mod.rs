//! Simulation systems, run once per tick in the canonical order:
//! timers → vitality → zones → brain → projectiles → movement →
//! succession → cleanup, with deferred spawns applied last.

pub mod brain;
pub mod cleanup;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod succession;
pub mod timers;
pub mod vitality;
pub mod zones;

use hecs::{Entity, World};

use emberfall_core::components::{ActiveSequences, AgentTag, Brain, Health, Hero};
use emberfall_core::constants::*;
use emberfall_core::events::CombatEvent;
use emberfall_combat_ai::health::{self, DamageOutcome};
use emberfall_combat_ai::profiles::get_profile;
use emberfall_combat_ai::{fsm, sequence};

use crate::encounter::EncounterStats;

/// Apply one hit to a unit through the health contract, emitting the
/// resulting events and reactions. This is the single damage path for
/// attacks, projectiles, and debug commands.
pub(crate) fn apply_hit(
    world: &mut World,
    target: Entity,
    attacker: Option<u32>,
    amount: u32,
    events: &mut Vec<CombatEvent>,
    stats: &mut EncounterStats,
) -> DamageOutcome {
    let is_hero = world.get::<&Hero>(target).is_ok();
    let unit = if is_hero {
        HERO_ID
    } else {
        match world.get::<&AgentTag>(target) {
            Ok(tag) => tag.id,
            Err(_) => return DamageOutcome::Ignored,
        }
    };

    let outcome = {
        let mut health = match world.get::<&mut Health>(target) {
            Ok(h) => h,
            Err(_) => return DamageOutcome::Ignored,
        };
        let outcome = health::apply_damage(&mut health, amount);
        if let DamageOutcome::Applied { .. } = outcome {
            events.push(CombatEvent::HealthChanged {
                unit,
                current: health.current,
                max: health.max,
            });
            if is_hero {
                // Classic i-frames: the hero cannot be shredded within one
                // overlapping volley.
                health::start_invulnerability(&mut health, ON_HIT_INVULN_SECS);
            }
        }
        outcome
    };

    if let DamageOutcome::Applied { died } = outcome {
        if let Some(attacker) = attacker {
            events.push(CombatEvent::HitLanded {
                attacker,
                target: unit,
                amount,
            });
        }
        if is_hero {
            stats.hero_hits_taken += 1;
        }

        if died {
            events.push(CombatEvent::UnitDied { unit });
            if !is_hero {
                stats.agents_slain += 1;
            }
        } else if !is_hero {
            // Stagger reaction; Death is requested by the vitality system.
            let archetype = world
                .get::<&AgentTag>(target)
                .map(|tag| tag.archetype)
                .ok();
            if let (Some(archetype), Ok(mut brain)) =
                (archetype, world.get::<&mut Brain>(target))
            {
                let profile = get_profile(archetype);
                if profile.hurt_stagger_secs > 0.0 {
                    brain.stagger_remaining_secs = profile.hurt_stagger_secs;
                    let _ = fsm::request(&mut brain, emberfall_core::enums::BehaviorState::Hurt);
                }
            }
            if let Ok(mut seqs) = world.get::<&mut ActiveSequences>(target) {
                seqs.list.push(sequence::damage_flash());
            }
        }
    }

    outcome
}
