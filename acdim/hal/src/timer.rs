//! Microsecond interval timer abstraction

use crate::error::HalResult;

/// Handler invoked from the timer interrupt
pub trait TickHandler: Sync {
    /// Handle one tick
    ///
    /// Returns the interval in microseconds until the next tick; the
    /// platform re-arms the timer with this value from within the same
    /// interrupt.
    fn on_tick(&self, now_us: u32) -> u32;
}

/// Free-running interval timer
///
/// After `start` the platform fires `handler` once per interval and
/// re-arms itself with the handler's return value.
pub trait IntervalTimer: Send {
    /// Arm the timer with an initial interval
    fn start(&mut self, initial_us: u32, handler: &'static dyn TickHandler) -> HalResult<()>;

    /// Stop the timer
    fn stop(&mut self) -> HalResult<()>;
}
