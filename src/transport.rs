//! Line transports
//!
//! The controller talks to the outside world through line-oriented
//! transports: a local console and a wireless serial link in the field,
//! in-memory queues on the desktop and in tests. Both are driven through
//! the same [`Transport`] trait.

use heapless::String;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{Receiver, Sender};
use crate::command::Line;
use crate::response::ResponseLine;

/// A duplex, line-buffered text stream
pub trait Transport {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Take the next complete line if one is available
    ///
    /// Must never block waiting for input.
    fn poll_line(&mut self) -> Option<Line>;

    /// Send one line; the transport appends the line terminator
    fn write_line(&mut self, line: &str);
}

/// Splits a byte stream into lines
///
/// `\n` terminates a line and `\r` is dropped. Bytes outside the ASCII range
/// are replaced by `?`. A line longer than `N` bytes is discarded as a
/// whole once its terminator arrives.
#[derive(Debug, Default)]
pub struct LineAssembler<const N: usize> {
    buffer: String<N>,
    overflowed: bool,
}

impl<const N: usize> LineAssembler<N> {
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            overflowed: false,
        }
    }

    /// Feed one byte, returning the line it completes
    pub fn push(&mut self, byte: u8) -> Option<String<N>> {
        match byte {
            b'\n' => self.finish(),
            b'\r' => None,
            _ => {
                let c = if byte.is_ascii() { char::from(byte) } else { '?' };
                if !self.overflowed && self.buffer.push(c).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn finish(&mut self) -> Option<String<N>> {
        let line = core::mem::take(&mut self.buffer);
        if core::mem::replace(&mut self.overflowed, false) {
            #[cfg(feature = "esp32-log")]
            println!("[LineAssembler] dropped line longer than {} bytes", N);
            return None;
        }
        Some(line)
    }
}

/// Transport backed by a pair of [`Channel`](crate::channel::Channel)s
///
/// Incoming lines are pushed by the receiver (an RX interrupt or task),
/// responses are queued for the transmitter to drain.
pub struct QueuedTransport<'a, const IN: usize, const OUT: usize> {
    name: &'static str,
    lines: Receiver<'a, Line, IN>,
    responses: Sender<'a, ResponseLine, OUT>,
}

impl<'a, const IN: usize, const OUT: usize> QueuedTransport<'a, IN, OUT> {
    pub const fn new(
        name: &'static str,
        lines: Receiver<'a, Line, IN>,
        responses: Sender<'a, ResponseLine, OUT>,
    ) -> Self {
        Self {
            name,
            lines,
            responses,
        }
    }
}

impl<const IN: usize, const OUT: usize> Transport for QueuedTransport<'_, IN, OUT> {
    fn name(&self) -> &str {
        self.name
    }

    fn poll_line(&mut self) -> Option<Line> {
        self.lines.try_receive().ok()
    }

    fn write_line(&mut self, line: &str) {
        let mut response = ResponseLine::new();
        for c in line.chars() {
            if response.push(c).is_err() {
                break;
            }
        }
        if self.responses.try_send(response).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[{}] response queue full, dropped: {}", self.name, line);
        }
    }
}
