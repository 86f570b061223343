//! Constant intensity pattern
//!
//! Holds every channel at the global intensity. Only channels whose last
//! written duty differs are touched, so steady state costs no sink writes.

use crate::DutySink;
use crate::config::CHANNEL_COUNT;
use crate::state::ControlState;

/// Write the global intensity to every channel that does not hold it yet
pub(super) fn tick<S: DutySink>(state: &mut ControlState, sink: &mut S) -> bool {
    let target = state.intensity();
    let mut changed = false;
    for channel in 0..CHANNEL_COUNT {
        if state.channel_duty()[channel] != target {
            state.write_duty(channel, target, sink);
            changed = true;
        }
    }
    changed
}
