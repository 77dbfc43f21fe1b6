//! Cleanup system: removes resolved, expired, out-of-bounds, and faded
//! entities. Uses a pre-allocated buffer to avoid per-tick allocation.

use hecs::{Entity, World};

use emberfall_core::components::{AgentTag, Brain, Projectile, RingEmitter, SuccessionPlan};
use emberfall_core::constants::{ARENA_HALF_HEIGHT, ARENA_HALF_WIDTH};
use emberfall_core::types::Position;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    // Projectiles: resolved this tick, expired, or outside the playable area.
    for (entity, (projectile, pos)) in world.query_mut::<(&Projectile, &Position)>() {
        if projectile.resolved
            || projectile.lifetime_remaining_secs <= 0.0
            || pos.x.abs() > ARENA_HALF_WIDTH
            || pos.y.abs() > ARENA_HALF_HEIGHT
        {
            despawn_buffer.push(entity);
        }
    }

    // Spent ring emitters.
    for (entity, emitter) in world.query_mut::<&RingEmitter>() {
        if emitter.spawned >= emitter.count {
            despawn_buffer.push(entity);
        }
    }

    // Agents whose death fade finished, once succession has had its turn.
    for (entity, (_tag, brain, plan)) in
        world.query_mut::<(&AgentTag, &Brain, Option<&SuccessionPlan>)>()
    {
        if brain.fade_complete && plan.map_or(true, |p| p.done) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
