//! Zero-cross edge-interrupt path

use core::sync::atomic::Ordering;

use acdim_core::{FiringMethod, Micros};
use acdim_hal::gpio::Level;

use crate::channel::DimmerChannel;
use crate::firing;

/// Edges closer together than this are bounce within the same pulse
pub const SPURIOUS_EDGE_WINDOW_US: u32 = 5_000;

impl DimmerChannel {
    /// Process one falling edge on this channel's zero-cross source
    ///
    /// Runs in interrupt context and must complete in microseconds. A
    /// genuine new half-cycle replaces the cycle-length estimate; a
    /// bounced re-trigger folds its short delta into the estimate instead
    /// of overwriting it.
    pub fn handle_zero_cross(&self, now: Micros) {
        let delta = now.elapsed_since(self.last_zero_cross_at());
        if delta > SPURIOUS_EDGE_WINDOW_US {
            self.cycle_length_us.store(delta, Ordering::Relaxed);
        } else {
            let cycle = self.cycle_length_us.load(Ordering::Relaxed);
            self.cycle_length_us
                .store(cycle.wrapping_add(delta), Ordering::Relaxed);
        }
        self.last_zero_cross_at.store(now.raw(), Ordering::Relaxed);

        let duty = self.duty();
        let cycle_us = self.cycle_length_us.load(Ordering::Relaxed);
        if duty.is_full() {
            // saturated on: no scheduling, hold the gate high
            self.store_offsets(0, 0);
            self.gate_write(Level::High);
        } else if self.take_init_cycle() {
            // one full conducting half-cycle to prime downstream
            // DC-blocking and snubber parts before modulation starts
            self.store_offsets(0, cycle_us);
            self.gate_write(Level::High);
        } else if duty.is_off() {
            self.store_offsets(0, 0);
            self.gate_write(Level::Low);
        } else {
            let offsets =
                firing::compute_offsets(self.config().method, duty, cycle_us, self.config().min_power);
            if self.config().method == FiringMethod::Leading {
                // conduction ended at this zero-cross; the scheduler
                // raises the gate again at the firing angle
                self.gate_write(Level::Low);
            }
            self.store_offsets(offsets.enable_us, offsets.disable_us);
        }
    }
}
