use core::fmt::{self, Write};

use heapless::String;

use crate::config::MAX_RESPONSE_LEN;
use crate::error::CommandError;
use crate::state::PatternMode;

/// One response line, without the trailing newline
pub type ResponseLine = String<MAX_RESPONSE_LEN>;

/// Successful outcome of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// `OK:MODE:<X>`
    Mode(PatternMode),
    /// `OK:INTENSITY:<n>`
    Intensity(u8),
    /// `OK:SPEED:<n>`
    Speed(u16),
    /// `STATUS:MODE:<X>,INTENSITY:<n>,SPEED:<n>`
    Status {
        mode: PatternMode,
        intensity: u8,
        speed_ms: u16,
    },
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(mode) => write!(f, "OK:MODE:{}", mode),
            Self::Intensity(intensity) => write!(f, "OK:INTENSITY:{}", intensity),
            Self::Speed(speed_ms) => write!(f, "OK:SPEED:{}", speed_ms),
            Self::Status {
                mode,
                intensity,
                speed_ms,
            } => write!(
                f,
                "STATUS:MODE:{},INTENSITY:{},SPEED:{}",
                mode, intensity, speed_ms
            ),
        }
    }
}

/// Render the outcome of a command into a single response line
pub fn render(outcome: &Result<Response, CommandError>) -> ResponseLine {
    let mut line = ResponseLine::new();
    // Capacity covers the longest possible response
    let _ = match outcome {
        Ok(response) => write!(line, "{}", response),
        Err(error) => write!(line, "{}", error),
    };
    line
}
