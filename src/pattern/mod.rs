//! Pattern engine
//!
//! Once per tick the engine looks at the active [`PatternMode`] and lets the
//! matching generator compute and write the channel duties. Stop mode has
//! no generator: its outputs were zeroed when the mode was entered.

mod constant;
mod wave;

use embassy_time::Instant;

pub use wave::{wave_duty, wave_frame};

use crate::DutySink;
use crate::state::{ControlState, PatternMode};

/// Run one tick of the pattern selected by `state`
///
/// Returns `true` if any channel was written.
pub fn tick<S: DutySink>(state: &mut ControlState, sink: &mut S, now: Instant) -> bool {
    match state.mode() {
        PatternMode::Stopped => false,
        PatternMode::Constant => constant::tick(state, sink),
        PatternMode::Wave => wave::tick(state, sink, now),
    }
}

/// Earliest instant at which the active pattern will write again
///
/// Only the wave generator runs on a schedule; the others report `None`.
pub fn next_update(state: &ControlState) -> Option<Instant> {
    match state.mode() {
        PatternMode::Stopped | PatternMode::Constant => None,
        PatternMode::Wave => wave::next_update(state),
    }
}
