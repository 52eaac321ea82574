//! Timer-interrupt tick path

use core::sync::atomic::Ordering;

use acdim_core::Micros;
use acdim_hal::gpio::Level;

use crate::channel::DimmerChannel;

/// Minimum width of a gate pulse once the gate has gone high
pub const GATE_ENABLE_TIME_US: u32 = 50;

/// Re-check interval once the half-cycle has fully elapsed, to pick up
/// the next zero-cross promptly
pub const ZC_RETRY_INTERVAL_US: u32 = 100;

impl DimmerChannel {
    /// Service this channel from the timer interrupt
    ///
    /// Returns microseconds until the next required action, 0 when nothing
    /// is known to be pending. Saturated duties and unsynchronized
    /// channels need no ticks; their gate level is settled at the edge.
    pub fn service(&self, now: Micros) -> u32 {
        let last = self.last_zero_cross_at();
        if last.is_zero() {
            return 0;
        }
        if self.duty().is_saturated() {
            return 0;
        }
        let elapsed = now.elapsed_since(last);

        let mut enable = self.enable_offset_us.load(Ordering::Relaxed);
        let mut disable = self.disable_offset_us.load(Ordering::Relaxed);

        if enable != 0 && elapsed >= enable {
            self.enable_offset_us.store(0, Ordering::Relaxed);
            enable = 0;
            self.gate_write(Level::High);
            // widen too-short pulses so the triac latches
            let floor = elapsed + GATE_ENABLE_TIME_US;
            if disable < floor {
                disable = floor;
                self.disable_offset_us.store(disable, Ordering::Relaxed);
            }
        }
        if disable != 0 && elapsed >= disable {
            self.disable_offset_us.store(0, Ordering::Relaxed);
            disable = 0;
            self.gate_write(Level::Low);
        }

        if enable != 0 {
            return enable - elapsed;
        }
        if disable != 0 {
            return disable - elapsed;
        }

        let cycle = self.cycle_length_us.load(Ordering::Relaxed);
        if elapsed >= cycle {
            return ZC_RETRY_INTERVAL_US;
        }
        cycle - elapsed
    }
}
