//! External dimmer facade

use core::fmt;

use acdim_core::{DimError, DimResult, DutyLevel};
use acdim_hal::gpio::{Level, ZeroCrossPin};
use acdim_hal::timer::IntervalTimer;

use crate::channel::DimmerChannel;
use crate::registry::{self, ZeroCrossFanout, MIN_TICK_INTERVAL_US};

/// Externally visible dimmer output
///
/// Owns one registered channel. Accepts normalized brightness commands and
/// echoes its configuration for diagnostics; everything time-critical
/// happens in the interrupt paths of the underlying channel.
pub struct Dimmer {
    channel: &'static DimmerChannel,
}

impl Dimmer {
    /// Wrap a statically allocated channel
    pub const fn new(channel: &'static DimmerChannel) -> Self {
        Self { channel }
    }

    /// One-time hardware setup
    ///
    /// Drives the gate low, registers the channel, attaches the
    /// falling-edge interrupt if this is the first channel on the
    /// zero-cross line, and arms the shared firing timer if it is the
    /// first channel overall. Failures here are fatal configuration
    /// errors; there is no retry.
    pub fn setup(
        &mut self,
        zero_cross: &mut dyn ZeroCrossPin,
        fanout: &'static ZeroCrossFanout,
        timer: &mut dyn IntervalTimer,
    ) -> DimResult<()> {
        if fanout.pin_id() != self.channel.zero_cross_pin_id()
            || zero_cross.pin_number() != self.channel.zero_cross_pin_id()
        {
            return Err(DimError::ZeroCrossMismatch);
        }
        self.channel.gate_write(Level::Low);
        let registration = registry::register_channel(self.channel)?;
        if registration.first_for_pin {
            zero_cross
                .attach_falling_edge(fanout)
                .map_err(|_| DimError::Interrupt)?;
        }
        if registration.first_overall {
            timer
                .start(MIN_TICK_INTERVAL_US, registry::tick_handler())
                .map_err(|_| DimError::Timer)?;
        }
        Ok(())
    }

    /// Command a new brightness level
    ///
    /// `level` is clamped to [0, 1] and RMS-linearized so perceived power
    /// tracks the command linearly. Non-blocking; the new duty takes
    /// effect at the next zero-cross. Until the first zero-cross has been
    /// observed the channel silently stays off.
    pub fn write(&mut self, level: f32) {
        let duty = DutyLevel::from_brightness(level);
        if self.channel.config().init_with_half_cycle
            && self.channel.duty().is_off()
            && !duty.is_off()
        {
            self.channel.request_init_cycle();
        }
        self.channel.set_duty(duty);
    }

    /// Current target duty
    pub fn duty(&self) -> DutyLevel {
        self.channel.duty()
    }

    /// Estimated mains frequency in Hz, available once synchronized
    pub fn mains_frequency_hz(&self) -> Option<f32> {
        self.channel.mains_frequency_hz()
    }
}

impl fmt::Display for Dimmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.channel.config();
        write!(
            f,
            "AcDimmer(gate: {}, zero-cross: {}, method: {}, min power: {}, half-cycle start: {}",
            self.channel.gate_pin_number(),
            config.zero_cross_pin_id,
            config.method,
            config.min_power,
            config.init_with_half_cycle
        )?;
        match self.mains_frequency_hz() {
            Some(hz) => write!(f, ", mains: {}Hz)", hz),
            None => write!(f, ", mains: unsynchronized)"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Dimmer {
    fn format(&self, fmt: defmt::Formatter) {
        let config = self.channel.config();
        defmt::write!(
            fmt,
            "AcDimmer{{gate: {}, config: {}}}",
            self.channel.gate_pin_number(),
            config
        );
    }
}
