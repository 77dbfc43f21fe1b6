//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick, then clamps units (not
//! projectiles — those self-destroy out of bounds) to the arena.

use hecs::World;

use emberfall_core::components::{AgentTag, Hero};
use emberfall_core::constants::{ARENA_HALF_HEIGHT, ARENA_HALF_WIDTH, DT};
use emberfall_core::types::{Position, Velocity};

pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
    }

    for (_entity, (pos, _tag)) in world.query_mut::<(&mut Position, &AgentTag)>() {
        clamp_to_arena(pos);
    }
    for (_entity, (pos, _hero)) in world.query_mut::<(&mut Position, &Hero)>() {
        clamp_to_arena(pos);
    }
}

fn clamp_to_arena(pos: &mut Position) {
    pos.x = pos.x.clamp(-ARENA_HALF_WIDTH, ARENA_HALF_WIDTH);
    pos.y = pos.y.clamp(-ARENA_HALF_HEIGHT, ARENA_HALF_HEIGHT);
}
