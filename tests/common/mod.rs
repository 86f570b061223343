//! Shared mocks for the integration tests

#![allow(dead_code)] // Each test file uses a different subset

use std::collections::VecDeque;

use pwm_pattern_composer::{CHANNEL_COUNT, DutySink, Line, Transport};

/// Output sink that records every write
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub duty: [u8; CHANNEL_COUNT],
    pub writes: Vec<(usize, u8)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Channels written since the last `clear`, in write order
    pub fn written_channels(&self) -> Vec<usize> {
        self.writes.iter().map(|(channel, _)| *channel).collect()
    }
}

impl DutySink for RecordingSink {
    fn set_duty(&mut self, channel: usize, duty: u8) {
        self.duty[channel] = duty;
        self.writes.push((channel, duty));
    }
}

/// In-memory transport with scripted input
#[derive(Debug)]
pub struct MockTransport {
    pub name: &'static str,
    pub incoming: VecDeque<String>,
    pub written: Vec<String>,
}

impl MockTransport {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            incoming: VecDeque::new(),
            written: Vec::new(),
        }
    }

    pub fn send(&mut self, line: &str) {
        self.incoming.push_back(line.to_string());
    }
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        self.name
    }

    fn poll_line(&mut self) -> Option<Line> {
        let text = self.incoming.pop_front()?;
        let mut line = Line::new();
        line.push_str(&text).expect("test line fits");
        Some(line)
    }

    fn write_line(&mut self, line: &str) {
        self.written.push(line.to_string());
    }
}
