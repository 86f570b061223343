#![no_std]

pub mod channel;
pub mod command;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod pattern;
pub mod response;
pub mod scheduler;
pub mod shared;
pub mod state;
pub mod transport;

pub use channel::{Channel, LineChannel, ResponseChannel};
pub use command::{Command, Line};
pub use config::{CHANNEL_COUNT, ControllerConfig, MAX_DUTY};
pub use controller::Controller;
pub use error::CommandError;
pub use response::{Response, ResponseLine};
pub use scheduler::{ControlLoop, PollResult};
pub use shared::SharedController;
pub use state::{ControlState, PatternMode};
pub use transport::{LineAssembler, QueuedTransport, Transport};

pub use embassy_time::{Duration, Instant};

/// Abstract PWM output trait
///
/// Implement this trait to drive the physical channels. Writing the duty a
/// channel already has must be harmless: the wave pattern rewrites every
/// channel on each step.
pub trait DutySink {
    /// Apply `duty` (0..=[`MAX_DUTY`]) to `channel` (0..[`CHANNEL_COUNT`])
    fn set_duty(&mut self, channel: usize, duty: u8);
}
