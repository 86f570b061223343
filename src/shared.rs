//! Controller shared between execution contexts.
//!
//! When transports are serviced from separate tasks or interrupts, every
//! read-modify-write of the control state has to happen inside one mutual
//! exclusion region. [`SharedController`] runs each command and each tick
//! inside a single critical section.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;

use crate::DutySink;
use crate::config::ControllerConfig;
use crate::controller::Controller;
use crate::response::ResponseLine;

pub struct SharedController<S: DutySink> {
    inner: Mutex<RefCell<Controller<S>>>,
}

impl<S: DutySink> SharedController<S> {
    pub fn new(sink: S, config: &ControllerConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Controller::new(sink, config))),
        }
    }

    /// Handle one raw line atomically with respect to ticks
    pub fn handle_line(&self, raw: &str) -> Option<ResponseLine> {
        self.with(|controller| controller.handle_line(raw))
    }

    /// Run one engine tick atomically with respect to commands
    pub fn tick(&self, now: Instant) -> bool {
        self.with(|controller| controller.tick(now))
    }

    /// Run `f` with exclusive access to the controller
    ///
    /// Keep `f` short: interrupts are masked for its whole duration.
    pub fn with<R>(&self, f: impl FnOnce(&mut Controller<S>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow(cs).borrow_mut()))
    }
}
