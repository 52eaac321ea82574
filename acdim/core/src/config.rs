//! Set-once channel configuration

use core::fmt;
use crate::FiringMethod;

/// Full-scale value of the minimum-power floor, in thousandths
pub const MIN_POWER_SCALE: u16 = 1000;

/// Minimum-power floor for the conduction window
///
/// Stored in thousandths of full scale. A floor of `from_percent(5.0)`
/// keeps at least 5% of each half-cycle conducting regardless of how low
/// the commanded duty goes, so a deliverable pulse always remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MinPower(u16);

impl MinPower {
    /// No floor
    pub const ZERO: Self = Self(0);

    /// Create a floor from thousandths of full scale, saturating at 1000
    pub const fn from_thousandths(raw: u16) -> Self {
        if raw > MIN_POWER_SCALE {
            Self(MIN_POWER_SCALE)
        } else {
            Self(raw)
        }
    }

    /// Create a floor from a percentage, clamped to [0, 100]
    pub fn from_percent(percent: f32) -> Self {
        Self((percent.clamp(0.0, 100.0) * 10.0) as u16)
    }

    /// Get the floor in thousandths of full scale
    pub const fn thousandths(self) -> u16 {
        self.0
    }

    /// Get the floor as a percentage
    pub fn as_percent(self) -> f32 {
        self.0 as f32 / 10.0
    }
}

impl fmt::Display for MinPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MinPower {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}.{}%", self.0 / 10, self.0 % 10);
    }
}

/// Configuration for one dimmer channel
///
/// Built once before setup and never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Identifier of the physical zero-cross source; channels sharing one
    /// detector carry the same id
    pub zero_cross_pin_id: u32,
    /// Gate firing strategy
    pub method: FiringMethod,
    /// Floor below which the conduction window is never shortened
    pub min_power: MinPower,
    /// Deliver one full conducting half-cycle on the first off-to-on write
    pub init_with_half_cycle: bool,
}

impl ChannelConfig {
    /// Configuration with no minimum-power floor and no half-cycle start
    pub const fn new(zero_cross_pin_id: u32, method: FiringMethod) -> Self {
        Self {
            zero_cross_pin_id,
            method,
            min_power: MinPower::ZERO,
            init_with_half_cycle: false,
        }
    }

    /// Set the minimum-power floor
    pub const fn with_min_power(mut self, min_power: MinPower) -> Self {
        self.min_power = min_power;
        self
    }

    /// Request a full conducting half-cycle on the first activation
    pub const fn with_init_half_cycle(mut self) -> Self {
        self.init_with_half_cycle = true;
        self
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ChannelConfig{{zero_cross: {}, method: {}, min_power: {}, init_half_cycle: {}}}",
            self.zero_cross_pin_id,
            self.method,
            self.min_power,
            self.init_with_half_cycle
        );
    }
}
