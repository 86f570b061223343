use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DutySink;
use crate::command::{Command, normalize};
use crate::config::ControllerConfig;
use crate::dispatcher::dispatch;
use crate::error::CommandError;
use crate::pattern;
use crate::response::{Response, ResponseLine, render};
use crate::state::ControlState;

/// Controller - owns the control state and the output sink
///
/// Command lines and pattern ticks both go through `&mut self`, so a command
/// can never observe a half-finished tick and vice versa.
pub struct Controller<S: DutySink> {
    sink: S,
    state: ControlState,
}

impl<S: DutySink> Controller<S> {
    /// Create a controller in its startup state
    ///
    /// The sink is not written until the first command or tick.
    pub fn new(sink: S, config: &ControllerConfig) -> Self {
        Self {
            sink,
            state: ControlState::new(config),
        }
    }

    /// Handle one raw line from a transport
    ///
    /// Returns the response line, or `None` for a line that is empty after
    /// trimming or longer than [`MAX_LINE_LEN`](crate::config::MAX_LINE_LEN).
    pub fn handle_line(&mut self, raw: &str) -> Option<ResponseLine> {
        let line = normalize(raw)?;
        let outcome = self.execute(&line);
        let response = render(&outcome);
        #[cfg(feature = "esp32-log")]
        println!("[Controller] {} -> {}", line.as_str(), response.as_str());
        Some(response)
    }

    /// Parse and dispatch one normalized line
    pub fn execute(&mut self, line: &str) -> Result<Response, CommandError> {
        let command = Command::parse(line)?;
        dispatch(&mut self.state, &mut self.sink, command)
    }

    /// Run one pattern engine tick
    ///
    /// Returns `true` if any channel was written.
    pub fn tick(&mut self, now: Instant) -> bool {
        pattern::tick(&mut self.state, &mut self.sink, now)
    }

    /// Instant at which the active pattern will next write, if scheduled
    pub fn next_update(&self) -> Option<Instant> {
        pattern::next_update(&self.state)
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
