//! Wrapping microsecond timestamps

use core::fmt;

/// Monotonic microsecond timestamp
///
/// Wraps after about 71 minutes; elapsed-time arithmetic is wrapping, so
/// intervals stay correct across the wrap. `Micros::ZERO` doubles as the
/// "never observed" sentinel in the zero-cross bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Micros(u32);

impl Micros {
    /// Zero timestamp, also the "never observed" sentinel
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from a raw microsecond count
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw microsecond count
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check for the sentinel value
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Microseconds elapsed since an earlier timestamp (wrapping)
    pub const fn elapsed_since(self, earlier: Micros) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Micros {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}us", self.0);
    }
}
