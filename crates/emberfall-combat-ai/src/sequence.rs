//! Suspendable sequence scheduling.
//!
//! A sequence is a list of steps with a cursor: emits run back-to-back within
//! a tick, waits suspend it until a later tick. The sim advances every
//! attached sequence once per tick and applies the emitted effects through
//! the normal component contracts. Condition waits carry a maximum-wait
//! fallback so a predicate that never becomes true cannot suspend a sequence
//! forever.

use emberfall_core::components::{
    ActiveSequences, Sequence, SequenceEffect, SequenceScope, SequenceSignal, SequenceStep,
};
use emberfall_core::constants::*;
use emberfall_core::enums::{AttackId, BehaviorState};

/// Signals observable by sequences this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalSet {
    pub landed: bool,
}

impl SignalSet {
    pub fn raised(&self, signal: SequenceSignal) -> bool {
        match signal {
            SequenceSignal::Landed => self.landed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStatus {
    Running,
    Finished,
}

/// Advance a sequence by one tick. Emitted effects are appended to
/// `effects`; the tick's `dt` is charged to the first yield point reached.
pub fn advance(
    seq: &mut Sequence,
    dt: f64,
    signals: &SignalSet,
    effects: &mut Vec<SequenceEffect>,
) -> SequenceStatus {
    let mut dt_budget = dt;

    loop {
        let Some(step) = seq.steps.get(seq.cursor) else {
            return SequenceStatus::Finished;
        };

        match step {
            SequenceStep::Emit { effect } => {
                effects.push(*effect);
                seq.cursor += 1;
            }
            SequenceStep::Wait { secs } => {
                let secs = *secs;
                seq.waited_secs += dt_budget;
                dt_budget = 0.0;
                if seq.waited_secs >= secs {
                    seq.cursor += 1;
                    seq.waited_secs = 0.0;
                } else {
                    return SequenceStatus::Running;
                }
            }
            SequenceStep::WaitUntil {
                signal,
                max_wait_secs,
            } => {
                let (signal, max_wait) = (*signal, *max_wait_secs);
                seq.waited_secs += dt_budget;
                dt_budget = 0.0;
                if signals.raised(signal) || seq.waited_secs >= max_wait {
                    seq.cursor += 1;
                    seq.waited_secs = 0.0;
                } else {
                    return SequenceStatus::Running;
                }
            }
        }
    }
}

/// Drop every sequence scoped to `state`. Called when that state is exited,
/// so an interrupted attack or telegraph leaves no dangling timer behind.
pub fn cancel_scoped(seqs: &mut ActiveSequences, state: BehaviorState) {
    seqs.list.retain(|s| s.scope != SequenceScope::State(state));
}

// --- Stock sequences ---

/// Orthogonal damage flash: survives Hurt/Death interruptions.
pub fn damage_flash() -> Sequence {
    Sequence::new(
        SequenceScope::Orthogonal,
        vec![
            SequenceStep::Emit {
                effect: SequenceEffect::FlashOn,
            },
            SequenceStep::Wait {
                secs: HURT_FLASH_SECS,
            },
            SequenceStep::Emit {
                effect: SequenceEffect::FlashOff,
            },
        ],
    )
}

/// Death fade: waits out the fade, then marks the agent removable.
pub fn death_fade() -> Sequence {
    Sequence::new(
        SequenceScope::State(BehaviorState::Death),
        vec![
            SequenceStep::Wait {
                secs: DEATH_FADE_SECS,
            },
            SequenceStep::Emit {
                effect: SequenceEffect::FadeComplete,
            },
        ],
    )
}

/// Warning-then-strike windup for telegraphed attacks.
pub fn telegraph_windup(attack: AttackId, lead_secs: f64) -> Sequence {
    Sequence::new(
        SequenceScope::State(BehaviorState::Attack),
        vec![
            SequenceStep::Emit {
                effect: SequenceEffect::Telegraph(attack),
            },
            SequenceStep::Wait { secs: lead_secs },
            SequenceStep::Emit {
                effect: SequenceEffect::BeginStrike,
            },
        ],
    )
}

/// Airborne windup: strike on landing, or after the maximum air time if the
/// landing predicate never fires.
pub fn leap_windup() -> Sequence {
    Sequence::new(
        SequenceScope::State(BehaviorState::Attack),
        vec![
            SequenceStep::WaitUntil {
                signal: SequenceSignal::Landed,
                max_wait_secs: LEAP_MAX_AIR_SECS,
            },
            SequenceStep::Emit {
                effect: SequenceEffect::BeginStrike,
            },
        ],
    )
}
