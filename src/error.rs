use core::fmt;

use crate::command::Line;

/// Reasons a command line is rejected
///
/// All of them are reported back over the transports as a single response
/// line; none of them is fatal and none is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// `MODE:<X>` with X not one of STOP, CONSTANT, WAVE
    InvalidMode,
    /// `INTENSITY:<n>` with n outside 0-255
    IntensityOutOfRange,
    /// `SPEED:<n>` with n outside 50-500
    SpeedOutOfRange,
    /// Anything the grammar does not recognize, carrying the normalized line
    UnknownCommand(Line),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode => f.write_str("ERROR:INVALID_MODE"),
            Self::IntensityOutOfRange => f.write_str("ERROR:INTENSITY_OUT_OF_RANGE"),
            Self::SpeedOutOfRange => f.write_str("ERROR:SPEED_OUT_OF_RANGE"),
            Self::UnknownCommand(line) => write!(f, "ERROR: Unknown command - {}", line),
        }
    }
}
