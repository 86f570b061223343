//! Shared control record
//!
//! Holds everything the dispatcher mutates and the pattern engine reads:
//! the active pattern, its parameters, the wave cursor and a mirror of the
//! duty last written to every channel.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DutySink;
use crate::config::{CHANNEL_COUNT, ControllerConfig};

const MODE_NAME_STOP: &str = "STOP";
const MODE_NAME_CONSTANT: &str = "CONSTANT";
const MODE_NAME_WAVE: &str = "WAVE";

/// Pattern selected by `MODE:<X>`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatternMode {
    /// All outputs held at zero
    #[default]
    Stopped,
    /// All outputs held at the global intensity
    Constant,
    /// Travelling sine wave across the channels
    Wave,
}

impl PatternMode {
    /// Wire name used in commands and responses
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => MODE_NAME_STOP,
            Self::Constant => MODE_NAME_CONSTANT,
            Self::Wave => MODE_NAME_WAVE,
        }
    }

    /// Parse an (already upper-cased) wire name
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_STOP => Some(Self::Stopped),
            MODE_NAME_CONSTANT => Some(Self::Constant),
            MODE_NAME_WAVE => Some(Self::Wave),
            _ => None,
        }
    }
}

impl core::fmt::Display for PatternMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating state of the controller
///
/// Created once at startup and mutated in place for the process lifetime.
#[derive(Debug, Clone)]
pub struct ControlState {
    mode: PatternMode,
    intensity: u8,
    wave_speed_ms: u16,
    wave_position: usize,
    last_update: Instant,
    channel_duty: [u8; CHANNEL_COUNT],
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(&ControllerConfig::default())
    }
}

impl ControlState {
    /// Create the startup record from a configuration
    pub fn new(config: &ControllerConfig) -> Self {
        let config = config.sanitized();
        Self {
            mode: config.mode,
            intensity: config.intensity,
            wave_speed_ms: config.wave_speed_ms,
            wave_position: 0,
            last_update: Instant::from_millis(0),
            channel_duty: [0; CHANNEL_COUNT],
        }
    }

    pub const fn mode(&self) -> PatternMode {
        self.mode
    }

    pub const fn intensity(&self) -> u8 {
        self.intensity
    }

    pub const fn wave_speed_ms(&self) -> u16 {
        self.wave_speed_ms
    }

    /// Minimum interval between two wave steps
    #[allow(clippy::cast_lossless)]
    pub const fn wave_interval(&self) -> Duration {
        Duration::from_millis(self.wave_speed_ms as u64)
    }

    /// Channel that the next wave step is computed around
    pub const fn wave_position(&self) -> usize {
        self.wave_position
    }

    /// Timestamp of the most recent wave step
    pub const fn last_update(&self) -> Instant {
        self.last_update
    }

    /// Duty last written to every channel
    pub const fn channel_duty(&self) -> &[u8; CHANNEL_COUNT] {
        &self.channel_duty
    }

    /// Switch the active pattern, applying its entry side effects
    ///
    /// Entering `Stopped` zeroes every channel through the sink, even when
    /// the controller is already stopped. Entering `Wave` rewinds the wave
    /// cursor but keeps the outputs and the step timestamp.
    pub fn set_mode<S: DutySink>(&mut self, mode: PatternMode, sink: &mut S) {
        self.mode = mode;
        match mode {
            PatternMode::Stopped => self.stop_all(sink),
            PatternMode::Wave => self.wave_position = 0,
            PatternMode::Constant => {
                // Outputs converge on the next tick
            }
        }
    }

    /// Set the global intensity
    pub fn set_intensity(&mut self, intensity: u8) {
        self.intensity = intensity;
    }

    /// Set the wave step interval
    ///
    /// Callers validate the range; see [`crate::config::SPEED_RANGE_MS`].
    pub fn set_wave_speed_ms(&mut self, speed_ms: u16) {
        self.wave_speed_ms = speed_ms;
    }

    /// Drive every channel to zero duty
    pub fn stop_all<S: DutySink>(&mut self, sink: &mut S) {
        for (channel, duty) in self.channel_duty.iter_mut().enumerate() {
            *duty = 0;
            sink.set_duty(channel, 0);
        }
        #[cfg(feature = "esp32-log")]
        println!("[ControlState.stop_all] all channels stopped");
    }

    /// Record a duty written to `channel` and forward it to the sink
    pub(crate) fn write_duty<S: DutySink>(&mut self, channel: usize, duty: u8, sink: &mut S) {
        self.channel_duty[channel] = duty;
        sink.set_duty(channel, duty);
    }

    /// Record the timestamp of a wave step
    pub(crate) fn mark_updated(&mut self, now: Instant) {
        self.last_update = now;
    }

    /// Move the wave cursor one channel forward
    pub(crate) fn advance_wave(&mut self) {
        self.wave_position = (self.wave_position + 1) % CHANNEL_COUNT;
    }
}
