//! Cooperative control loop.
//!
//! One call to [`ControlLoop::poll`] is one pass of the firmware main loop:
//!
//! 1. every transport, in slice order, is polled for at most one line; the
//!    response to that line is written to all transports;
//! 2. the pattern engine runs one tick.
//!
//! Nothing blocks. The caller decides how to idle between passes, using
//! [`PollResult::next_wave_update`] as a hint.
//!
//! ```ignore
//! let mut control = ControlLoop::new();
//! loop {
//!     let now = Instant::from_millis(millis());
//!     // Wireless link first, then the serial console
//!     control.poll(&mut controller, &mut [&mut radio, &mut console], now);
//! }
//! ```

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DutySink;
use crate::controller::Controller;
use crate::transport::Transport;

/// Result of one loop pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollResult {
    /// Lines that produced a response during this pass.
    pub commands: usize,
    /// Whether the pattern engine wrote any channel.
    pub updated: bool,
    /// When the wave generator will fire next (wave mode only).
    pub next_wave_update: Option<Instant>,
}

/// Drives a [`Controller`] from a set of transports.
#[derive(Debug, Default)]
pub struct ControlLoop {
    passes: u64,
    commands: u64,
}

impl ControlLoop {
    pub const fn new() -> Self {
        Self {
            passes: 0,
            commands: 0,
        }
    }

    /// Run one loop pass at time `now`.
    pub fn poll<S: DutySink>(
        &mut self,
        controller: &mut Controller<S>,
        transports: &mut [&mut dyn Transport],
        now: Instant,
    ) -> PollResult {
        let mut commands = 0;

        for index in 0..transports.len() {
            let Some(line) = transports[index].poll_line() else {
                continue;
            };
            #[cfg(feature = "esp32-log")]
            println!("[{}] received: {}", transports[index].name(), line.as_str());

            let Some(response) = controller.handle_line(&line) else {
                continue;
            };
            for transport in transports.iter_mut() {
                transport.write_line(&response);
            }
            commands += 1;
        }

        let updated = controller.tick(now);

        self.passes += 1;
        self.commands += commands as u64;

        PollResult {
            commands,
            updated,
            next_wave_update: controller.next_update(),
        }
    }

    /// Number of passes run so far.
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// Number of commands answered so far.
    pub const fn commands(&self) -> u64 {
        self.commands
    }
}
