//! Bounded queue between an interrupt (or another task) and the control loop.
//!
//! Built on `critical-section` and `heapless::Deque`, so it can be placed in a
//! `static` and shared between a UART receive interrupt pushing command lines
//! and the main loop draining them. Responses travel the other way through a
//! second channel, drained by the transmitter.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::command::Line;
use crate::response::ResponseLine;

/// Error returned when trying to send to a full channel.
///
/// Carries the rejected value so the producer can retry or log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded FIFO guarded by a critical section.
///
/// Every operation takes the critical section for a single `Deque` push or
/// pop, so it is safe to call from an interrupt handler while the main loop
/// holds a [`Receiver`]. Nothing blocks: a full queue rejects the value and an
/// empty queue reports [`TryReceiveError`].
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

/// Queue of incoming command lines
pub type LineChannel<const SIZE: usize> = Channel<Line, SIZE>;

/// Queue of outgoing response lines
pub type ResponseChannel<const SIZE: usize> = Channel<ResponseLine, SIZE>;

impl<T, const SIZE: usize> Channel<T, SIZE> {
    /// Create an empty channel; usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Producer handle, typically handed to the receive interrupt.
    ///
    /// Several producers may share one channel.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Consumer handle, typically owned by a [`QueuedTransport`].
    ///
    /// [`QueuedTransport`]: crate::transport::QueuedTransport
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Enqueue `value` behind everything already queued.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(value)
                .map_err(TrySendError)
        })
    }

    /// Dequeue the oldest value.
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    /// Number of queued values.
    ///
    /// Only a snapshot: a producer in interrupt context may push right after.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    /// Whether nothing is queued (same caveat as [`Channel::len`]).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side of a [`Channel`].
///
/// A plain reference, cheap to copy into every place that produces values.
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// See [`Channel::try_send`].
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// Consumer side of a [`Channel`].
///
/// Several receivers are allowed, but they compete for values; the control
/// loop normally owns the only one.
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// See [`Channel::try_receive`].
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    /// See [`Channel::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
