//! Cooldown ledger queries.
//!
//! The ledger maps attack ids to the tick at which they last committed.
//! Entries appear lazily on the first stamp; an attack with no entry is ready.

use emberfall_core::components::CooldownLedger;
use emberfall_core::constants::DT;
use emberfall_core::enums::AttackId;

/// Is the attack off cooldown at `now_tick`?
pub fn ready(ledger: &CooldownLedger, id: AttackId, cooldown_secs: f64, now_tick: u64) -> bool {
    match ledger.last_fired.get(&id) {
        None => true,
        Some(last) => now_tick.saturating_sub(*last) as f64 * DT >= cooldown_secs,
    }
}

/// Stamp the attack as fired at `now_tick`.
pub fn stamp(ledger: &mut CooldownLedger, id: AttackId, now_tick: u64) {
    ledger.last_fired.insert(id, now_tick);
}
