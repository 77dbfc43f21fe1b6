//! Behavior finite state machine.
//!
//! The machine data lives on the `Brain` component; this module owns the
//! transition rules. Requests are deferred: a transition asked for during a
//! tick is committed at the top of the next brain dispatch, so no update ever
//! observes a half-transitioned machine and transition storms cannot recurse.

use emberfall_core::components::Brain;
use emberfall_core::constants::*;
use emberfall_core::enums::BehaviorState;
use emberfall_core::types::Position;
use rand::Rng;

/// Result of a transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Stored as the pending transition.
    Accepted,
    /// Duplicate of the current or already-pending state; nothing to do.
    Ignored,
    /// Death has been entered (or is pending); non-Death targets are refused.
    RejectedTerminal,
}

/// Request a transition. Death is terminal: once entered or pending, every
/// non-Death request is rejected. A later request supersedes an earlier
/// pending one within the same tick, except that a pending Death is never
/// displaced.
pub fn request(brain: &mut Brain, to: BehaviorState) -> TransitionOutcome {
    let death_locked =
        brain.state == BehaviorState::Death || brain.pending_state == Some(BehaviorState::Death);

    if death_locked {
        return if to == BehaviorState::Death {
            TransitionOutcome::Ignored
        } else {
            TransitionOutcome::RejectedTerminal
        };
    }

    if brain.pending_state.is_none() && to == brain.state && to != BehaviorState::Hurt {
        // Re-entering Hurt refreshes the stagger; other same-state requests
        // are meaningless.
        return TransitionOutcome::Ignored;
    }

    brain.pending_state = Some(to);
    TransitionOutcome::Accepted
}

/// Commit the pending transition, if any. Returns `(from, to)` so the caller
/// can run exit and enter effects exactly once.
pub fn commit(brain: &mut Brain, now_tick: u64) -> Option<(BehaviorState, BehaviorState)> {
    let to = brain.pending_state.take()?;
    let from = brain.state;
    brain.state = to;
    brain.state_entered_tick = now_tick;
    Some((from, to))
}

/// Seconds spent in the current state.
pub fn time_in_state(brain: &Brain, now_tick: u64) -> f64 {
    now_tick.saturating_sub(brain.state_entered_tick) as f64 * DT
}

/// Input to the per-tick transition policy for one agent.
pub struct DecisionContext {
    pub state: BehaviorState,
    pub has_target: bool,
    /// An eligible attack passed selection this tick.
    pub attack_ready: bool,
    /// The executing attack finished its recovery.
    pub attack_finished: bool,
    pub stagger_done: bool,
    /// Stuck in the melee zone past the escalation dwell with nothing ready.
    pub dwell_escalate: bool,
    pub patrols: bool,
    pub time_in_state_secs: f64,
}

/// Evaluate the transition policy. Returns the state to request, or None to
/// stay. Hurt and Death are requested elsewhere (by damage application and
/// vitality evaluation); this policy covers the deliberate transitions.
pub fn next_state(ctx: &DecisionContext) -> Option<BehaviorState> {
    match ctx.state {
        BehaviorState::Idle => {
            if ctx.has_target {
                Some(BehaviorState::React)
            } else if ctx.patrols && ctx.time_in_state_secs >= IDLE_LINGER_SECS {
                Some(BehaviorState::Patrol)
            } else {
                None
            }
        }
        BehaviorState::Patrol => ctx.has_target.then_some(BehaviorState::React),
        BehaviorState::React => {
            if !ctx.has_target {
                Some(if ctx.patrols {
                    BehaviorState::Patrol
                } else {
                    BehaviorState::Idle
                })
            } else if ctx.dwell_escalate {
                Some(BehaviorState::Defend)
            } else if ctx.attack_ready {
                Some(BehaviorState::Attack)
            } else {
                None
            }
        }
        BehaviorState::Attack => {
            if ctx.attack_finished {
                Some(if ctx.has_target {
                    BehaviorState::React
                } else {
                    BehaviorState::Idle
                })
            } else {
                None
            }
        }
        BehaviorState::Defend => {
            (ctx.time_in_state_secs >= DEFEND_SECS).then_some(BehaviorState::React)
        }
        BehaviorState::Hurt => {
            if ctx.stagger_done {
                Some(if ctx.has_target {
                    BehaviorState::React
                } else {
                    BehaviorState::Idle
                })
            } else {
                None
            }
        }
        BehaviorState::Death => None,
    }
}

/// Roll a fresh patrol waypoint inside the arena, away from the walls.
pub fn roll_patrol_goal<R: Rng>(rng: &mut R) -> Position {
    let margin = 2.0;
    Position::new(
        rng.gen_range(-(ARENA_HALF_WIDTH - margin)..(ARENA_HALF_WIDTH - margin)),
        rng.gen_range(-(ARENA_HALF_HEIGHT - margin)..(ARENA_HALF_HEIGHT - margin)),
    )
}
