//! Command dispatching
//!
//! Applies a parsed [`Command`] to the [`ControlState`], validating numeric
//! arguments on the way, and reports the outcome.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DutySink;
use crate::command::Command;
use crate::config::{INTENSITY_RANGE, SPEED_RANGE_MS};
use crate::error::CommandError;
use crate::response::Response;
use crate::state::{ControlState, PatternMode};

/// Execute one command against the control state
///
/// Rejected commands leave the state untouched.
pub fn dispatch<S: DutySink>(
    state: &mut ControlState,
    sink: &mut S,
    command: Command,
) -> Result<Response, CommandError> {
    match command {
        Command::SetMode(mode) => Ok(apply_mode(state, sink, mode)),
        Command::SetIntensity(value) => apply_intensity(state, value),
        Command::SetSpeed(value) => apply_speed(state, value),
        Command::QueryStatus => Ok(status(state)),
        Command::Unrecognized(line) => Err(CommandError::UnknownCommand(line)),
    }
}

/// Snapshot of the reportable settings
pub fn status(state: &ControlState) -> Response {
    Response::Status {
        mode: state.mode(),
        intensity: state.intensity(),
        speed_ms: state.wave_speed_ms(),
    }
}

fn apply_mode<S: DutySink>(state: &mut ControlState, sink: &mut S, mode: PatternMode) -> Response {
    #[cfg(feature = "esp32-log")]
    println!("[dispatch] mode {:?} -> {:?}", state.mode(), mode);
    state.set_mode(mode, sink);
    Response::Mode(mode)
}

fn apply_intensity(state: &mut ControlState, value: i32) -> Result<Response, CommandError> {
    let intensity = in_range(value, &INTENSITY_RANGE).ok_or(CommandError::IntensityOutOfRange)?;
    state.set_intensity(intensity);
    Ok(Response::Intensity(intensity))
}

fn apply_speed(state: &mut ControlState, value: i32) -> Result<Response, CommandError> {
    let speed_ms = in_range(value, &SPEED_RANGE_MS).ok_or(CommandError::SpeedOutOfRange)?;
    state.set_wave_speed_ms(speed_ms);
    Ok(Response::Speed(speed_ms))
}

/// Narrow `value` to `T` if it lies in `range`
fn in_range<T: TryFrom<i32>>(value: i32, range: &core::ops::RangeInclusive<i32>) -> Option<T> {
    if range.contains(&value) {
        T::try_from(value).ok()
    } else {
        None
    }
}
