//! Phase and death evaluation — runs after timers, before the brain.
//!
//! Dead agents are steered into the terminal Death state; living agents have
//! their phase thresholds evaluated (unless their archetype defers checks
//! while mid-attack).

use hecs::World;

use emberfall_core::components::{AgentTag, Brain, Health, PhaseTrack};
use emberfall_core::enums::BehaviorState;
use emberfall_core::events::CombatEvent;
use emberfall_combat_ai::profiles::get_profile;
use emberfall_combat_ai::{fsm, phase};

pub fn run(world: &mut World, events: &mut Vec<CombatEvent>) {
    for (_entity, (tag, health, track, brain)) in
        world.query_mut::<(&AgentTag, &Health, &mut PhaseTrack, &mut Brain)>()
    {
        if health.dead {
            // Idempotent: once Death is current or pending this is a no-op.
            let _ = fsm::request(brain, BehaviorState::Death);
            continue;
        }

        let profile = get_profile(tag.archetype);
        if !profile.phase_eval_during_attack && brain.state == BehaviorState::Attack {
            continue;
        }

        if let Some(index) = phase::evaluate(track, health) {
            events.push(CombatEvent::PhaseStarted {
                unit: tag.id,
                phase_index: index,
            });
        }
    }
}
