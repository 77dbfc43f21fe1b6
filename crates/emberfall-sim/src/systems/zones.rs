//! Tactical zone reclassification against the current target.

use hecs::World;

use emberfall_core::components::{AgentTag, Brain, ZoneTracker};
use emberfall_core::enums::ZoneTag;
use emberfall_core::types::Position;
use emberfall_combat_ai::profiles::get_profile;
use emberfall_combat_ai::zones;

use crate::spatial;

pub fn run(world: &mut World, now_tick: u64) {
    let units = spatial::collect_units(world);

    for (_entity, (tag, brain, tracker, pos)) in
        world.query_mut::<(&AgentTag, &Brain, &mut ZoneTracker, &Position)>()
    {
        let target = brain
            .target
            .and_then(|id| spatial::find_unit(&units, id))
            .filter(|u| u.alive);

        let zone = match target {
            Some(target) => {
                let profile = get_profile(tag.archetype);
                zones::classify(&profile.zone_bands, pos.range_to(&target.position))
            }
            None => ZoneTag::OutOfRange,
        };

        zones::observe(tracker, zone, now_tick);
    }
}
