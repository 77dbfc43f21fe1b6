//! Health-gated phase escalation.
//!
//! Thresholds are descending health fractions; each fires at most once and
//! never un-fires, so phase index only increases. At most one threshold fires
//! per evaluation, least severe first — a single hit that crosses several
//! thresholds catches up over consecutive ticks, preserving the
//! descending-health firing order.

use emberfall_core::components::{Health, PhaseTrack};

/// Evaluate the track against current health. Returns the 1-based phase index
/// that fired, if any. Never fires while dead or invulnerable.
pub fn evaluate(track: &mut PhaseTrack, health: &Health) -> Option<u32> {
    if health.dead || health.is_invulnerable() {
        return None;
    }

    let fraction = health.fraction();
    for i in 0..track.thresholds.len() {
        if !track.triggered[i] && fraction <= track.thresholds[i] {
            track.triggered[i] = true;
            return Some((i + 1) as u32);
        }
    }
    None
}
