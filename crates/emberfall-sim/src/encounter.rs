//! Running encounter statistics tracked by the engine.

use emberfall_core::state::StatsView;

#[derive(Debug, Clone, Default)]
pub struct EncounterStats {
    pub agents_slain: u32,
    pub hero_hits_taken: u32,
    pub successors_spawned: u32,
}

impl EncounterStats {
    pub fn view(&self) -> StatsView {
        StatsView {
            agents_slain: self.agents_slain,
            hero_hits_taken: self.hero_hits_taken,
            successors_spawned: self.successors_spawned,
        }
    }
}
