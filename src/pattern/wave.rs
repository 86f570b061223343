//! Travelling sine wave pattern
//!
//! Every `wave_speed_ms` the wave advances by one channel. Channel `i` gets
//!
//! ```text
//! duty = floor((sin(2π · (i − position) / CHANNEL_COUNT) + 1) / 2 · intensity)
//! ```
//!
//! so the crest sits a quarter turn ahead of the cursor and the trough a
//! quarter turn behind it.

use core::f32::consts::PI;

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DutySink;
use crate::config::CHANNEL_COUNT;
use crate::state::ControlState;

/// Step the wave if at least one interval has passed since the last step
pub(super) fn tick<S: DutySink>(state: &mut ControlState, sink: &mut S, now: Instant) -> bool {
    if now.saturating_duration_since(state.last_update()) < state.wave_interval() {
        return false;
    }
    state.mark_updated(now);

    let frame = wave_frame(state.wave_position(), state.intensity());
    for (channel, duty) in frame.into_iter().enumerate() {
        state.write_duty(channel, duty, sink);
    }
    state.advance_wave();

    #[cfg(feature = "esp32-log")]
    println!(
        "[wave] position {} duties {:?}",
        state.wave_position(),
        state.channel_duty()
    );
    true
}

pub(super) fn next_update(state: &ControlState) -> Option<Instant> {
    state.last_update().checked_add(state.wave_interval())
}

/// Duty of `channel` for a wave centred on `position`
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn wave_duty(channel: usize, position: usize, intensity: u8) -> u8 {
    let offset = channel as f32 - position as f32;
    let phase = offset / CHANNEL_COUNT as f32 * 2.0 * PI;
    let normalized = (libm::sinf(phase) + 1.0) / 2.0;
    (normalized * f32::from(intensity)) as u8
}

/// Duties of all channels for a wave centred on `position`
pub fn wave_frame(position: usize, intensity: u8) -> [u8; CHANNEL_COUNT] {
    core::array::from_fn(|channel| wave_duty(channel, position, intensity))
}
