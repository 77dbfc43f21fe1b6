//! Succession — continue an encounter past a boss's death.
//!
//! When a dying agent's fade completes and a succession plan is configured,
//! request a successor spawn at its position with scaled starting health.
//! The plan's `done` flag makes this idempotent: no matter how the death
//! sequence was reached, at most one successor ever spawns.

use hecs::World;

use emberfall_core::components::{AgentTag, Brain, SuccessionPlan};
use emberfall_core::constants::SUCCESSION_DEFAULT_FRACTION;
use emberfall_core::types::Position;
use emberfall_combat_ai::profiles::get_profile;

use crate::world_setup::PendingSpawn;

pub fn run(world: &mut World, spawns: &mut Vec<PendingSpawn>) {
    for (_entity, (tag, brain, pos, plan)) in
        world.query_mut::<(&AgentTag, &Brain, &Position, &mut SuccessionPlan)>()
    {
        if !brain.fade_complete || plan.done {
            continue;
        }
        plan.done = true;

        let fraction = if plan.starting_fraction > 0.0 && plan.starting_fraction <= 1.0 {
            plan.starting_fraction
        } else {
            SUCCESSION_DEFAULT_FRACTION
        };
        let successor_max = get_profile(plan.archetype).max_health;
        let starting = ((successor_max as f64 * fraction).round() as u32).max(1);

        spawns.push(PendingSpawn::Agent {
            archetype: plan.archetype,
            position: *pos,
            starting_health: Some(starting),
            predecessor: Some(tag.id),
        });
    }
}
