//! Controller limits, defaults and startup configuration.

use core::ops::RangeInclusive;

use crate::state::PatternMode;

/// Number of independently addressable PWM outputs.
pub const CHANNEL_COUNT: usize = 8;

/// Largest duty value accepted by the output sink (8-bit resolution).
pub const MAX_DUTY: u8 = 255;

/// Accepted values for `INTENSITY:<n>`.
pub const INTENSITY_RANGE: RangeInclusive<i32> = 0..=255;

/// Accepted values for `SPEED:<n>`, in milliseconds.
pub const SPEED_RANGE_MS: RangeInclusive<i32> = 50..=500;

/// Intensity applied at power-up (50%).
pub const DEFAULT_INTENSITY: u8 = 128;

/// Wave step interval applied at power-up.
pub const DEFAULT_WAVE_SPEED_MS: u16 = 100;

/// Maximum length of one command line in bytes.
pub const MAX_LINE_LEN: usize = 64;

/// Maximum length of one response line in bytes.
///
/// Leaves room for the `ERROR: Unknown command - ` prefix in front of a
/// full-length echoed command.
pub const MAX_RESPONSE_LEN: usize = MAX_LINE_LEN + 32;

/// Startup configuration for the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Pattern active after startup
    pub mode: PatternMode,
    /// Global intensity (0-255)
    pub intensity: u8,
    /// Minimum interval between wave steps in milliseconds (50-500)
    pub wave_speed_ms: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mode: PatternMode::Stopped,
            intensity: DEFAULT_INTENSITY,
            wave_speed_ms: DEFAULT_WAVE_SPEED_MS,
        }
    }
}

impl ControllerConfig {
    /// Returns a copy with the wave speed clamped into [`SPEED_RANGE_MS`].
    ///
    /// Intensity needs no clamping since every `u8` is a valid duty.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sanitized(self) -> Self {
        let min = *SPEED_RANGE_MS.start() as u16;
        let max = *SPEED_RANGE_MS.end() as u16;
        Self {
            wave_speed_ms: self.wave_speed_ms.clamp(min, max),
            ..self
        }
    }
}
