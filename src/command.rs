//! Command grammar
//!
//! Turns one normalized text line into a [`Command`]. Lines are matched on
//! their left-hand token, `:` being a hard separator:
//!
//! - `MODE:<STOP|CONSTANT|WAVE>`
//! - `INTENSITY:<n>`
//! - `SPEED:<n>`
//! - `STATUS`
//!
//! Anything else is [`Command::Unrecognized`].

use heapless::String;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::MAX_LINE_LEN;
use crate::error::CommandError;
use crate::state::PatternMode;

const PREFIX_MODE: &str = "MODE:";
const PREFIX_INTENSITY: &str = "INTENSITY:";
const PREFIX_SPEED: &str = "SPEED:";
const TOKEN_STATUS: &str = "STATUS";

/// One command line, as received or normalized
pub type Line = String<MAX_LINE_LEN>;

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the active pattern
    SetMode(PatternMode),
    /// Set the global intensity; the value is not range checked yet
    SetIntensity(i32),
    /// Set the wave step interval in milliseconds; not range checked yet
    SetSpeed(i32),
    /// Report mode, intensity and speed
    QueryStatus,
    /// Line that matches no rule of the grammar
    Unrecognized(Line),
}

impl Command {
    /// Parse a normalized line (see [`normalize`])
    ///
    /// The only rejection at this level is an unknown mode name; numeric
    /// ranges are validated when the command is dispatched.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        if let Some(name) = line.strip_prefix(PREFIX_MODE) {
            return PatternMode::parse_from_str(name)
                .map(Self::SetMode)
                .ok_or(CommandError::InvalidMode);
        }
        if let Some(value) = line.strip_prefix(PREFIX_INTENSITY) {
            return Ok(Self::SetIntensity(parse_int(value)));
        }
        if let Some(value) = line.strip_prefix(PREFIX_SPEED) {
            return Ok(Self::SetSpeed(parse_int(value)));
        }
        if line == TOKEN_STATUS {
            return Ok(Self::QueryStatus);
        }
        Ok(Self::Unrecognized(collect_line(line.chars())))
    }
}

/// Trim surrounding whitespace and upper-case ASCII letters
///
/// Returns `None` when nothing is left after trimming, or when the trimmed
/// line does not fit in [`MAX_LINE_LEN`] bytes. Over-long lines are dropped
/// whole, the same way [`LineAssembler`](crate::transport::LineAssembler)
/// drops them.
pub fn normalize(raw: &str) -> Option<Line> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut line = Line::new();
    if line.push_str(trimmed).is_err() {
        #[cfg(feature = "esp32-log")]
        println!("[normalize] dropped line longer than {} bytes", MAX_LINE_LEN);
        return None;
    }
    line.make_ascii_uppercase();
    Some(line)
}

/// Parse a decimal integer the way C `atol` does
///
/// Skips leading whitespace, accepts one optional sign, then consumes the
/// longest run of digits. Input without digits yields 0, trailing
/// characters are ignored and the result saturates at the `i32` bounds.
pub fn parse_int(text: &str) -> i32 {
    let mut chars = text.trim_start().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        #[allow(clippy::cast_possible_wrap)]
        let digit = digit as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

fn collect_line(chars: impl Iterator<Item = char>) -> Line {
    let mut line = Line::new();
    for c in chars {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}
