//! Tactical zone classification.
//!
//! Zones are ordered distance bands evaluated innermost first; the first band
//! whose radius covers the distance wins, so ties resolve to the closer zone.
//! The tracker stamps an entry tick per zone for dwell-time behaviors.

use emberfall_core::components::ZoneTracker;
use emberfall_core::constants::DT;
use emberfall_core::enums::ZoneTag;

/// Classify a distance against ascending-radius bands.
pub fn classify(bands: &[(f64, ZoneTag)], distance: f64) -> ZoneTag {
    for (radius, tag) in bands {
        if distance <= *radius {
            return *tag;
        }
    }
    ZoneTag::OutOfRange
}

/// Record the zone observed this tick. On a change, stamps the entry tick and
/// clears the dwell one-shot flag. Returns true if the zone changed.
pub fn observe(tracker: &mut ZoneTracker, zone: ZoneTag, now_tick: u64) -> bool {
    if tracker.current == zone {
        return false;
    }
    tracker.current = zone;
    tracker.entered_tick = now_tick;
    tracker.dwell_flag_consumed = false;
    true
}

/// Time spent in the given zone — zero unless it is the current one.
pub fn dwell_secs(tracker: &ZoneTracker, zone: ZoneTag, now_tick: u64) -> f64 {
    if tracker.current != zone {
        return 0.0;
    }
    now_tick.saturating_sub(tracker.entered_tick) as f64 * DT
}
