//! Timer decrement and sequence advancement — the first system each tick.
//!
//! Counts down invulnerability windows and hit staggers, then advances every
//! suspended sequence by one tick and applies the emitted effects through the
//! owning components.

use hecs::{Entity, World};

use emberfall_core::components::{
    ActiveSequences, AgentTag, AttackRuntime, Brain, Health, SequenceEffect,
};
use emberfall_core::constants::DT;
use emberfall_core::events::CombatEvent;
use emberfall_combat_ai::health;
use emberfall_combat_ai::sequence::{self, SequenceStatus, SignalSet};

pub fn run(world: &mut World, events: &mut Vec<CombatEvent>) {
    for (_entity, health) in world.query_mut::<&mut Health>() {
        health::tick_invulnerability(health, DT);
    }

    for (_entity, brain) in world.query_mut::<&mut Brain>() {
        if brain.stagger_remaining_secs > 0.0 {
            brain.stagger_remaining_secs = (brain.stagger_remaining_secs - DT).max(0.0);
        }
    }

    // Advance sequences, collecting effects per entity.
    let mut effect_buffer: Vec<(Entity, SequenceEffect)> = Vec::new();
    for (entity, (seqs, runtime)) in world
        .query_mut::<(&mut ActiveSequences, Option<&AttackRuntime>)>()
    {
        let signals = SignalSet {
            landed: runtime
                .and_then(|r| r.leap)
                .map(|leap| leap.landed())
                .unwrap_or(false),
        };

        let mut effects = Vec::new();
        seqs.list
            .retain_mut(|seq| {
                sequence::advance(seq, DT, &signals, &mut effects) == SequenceStatus::Running
            });
        for effect in effects {
            effect_buffer.push((entity, effect));
        }
    }

    for (entity, effect) in effect_buffer {
        match effect {
            SequenceEffect::Telegraph(attack) => {
                if let Ok(tag) = world.get::<&AgentTag>(entity) {
                    events.push(CombatEvent::TelegraphShown {
                        unit: tag.id,
                        attack,
                    });
                }
            }
            SequenceEffect::BeginStrike => {
                if let Ok(mut runtime) = world.get::<&mut AttackRuntime>(entity) {
                    runtime.strike_released = true;
                }
            }
            SequenceEffect::FlashOn => {
                if let Ok(mut brain) = world.get::<&mut Brain>(entity) {
                    brain.flash_active = true;
                }
            }
            SequenceEffect::FlashOff => {
                if let Ok(mut brain) = world.get::<&mut Brain>(entity) {
                    brain.flash_active = false;
                }
            }
            SequenceEffect::FadeComplete => {
                if let Ok(mut brain) = world.get::<&mut Brain>(entity) {
                    brain.fade_complete = true;
                }
            }
        }
    }
}
