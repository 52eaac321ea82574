//! Per-channel interrupt-shared state

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

use acdim_core::{ChannelConfig, DutyLevel, Micros};
use acdim_hal::gpio::{GatePin, Level};

/// State for one dimmer output
///
/// One channel exclusively owns its gate pin; many channels may reference
/// the same zero-cross source through `ChannelConfig::zero_cross_pin_id`.
/// Channels are created once at startup, registered, and live for the
/// process lifetime.
pub struct DimmerChannel {
    config: ChannelConfig,
    gate: &'static dyn GatePin,
    /// Target actuation level, written by the facade and read by the
    /// interrupt paths
    pub(crate) duty: AtomicU16,
    /// Most recent zero-cross-to-zero-cross duration
    pub(crate) cycle_length_us: AtomicU32,
    /// Timestamp of the most recent accepted edge; 0 = never observed
    pub(crate) last_zero_cross_at: AtomicU32,
    /// Offset from the last zero-cross at which the gate goes high;
    /// 0 = no enable pending
    pub(crate) enable_offset_us: AtomicU32,
    /// Offset from the last zero-cross at which the gate goes low;
    /// 0 = no disable pending
    pub(crate) disable_offset_us: AtomicU32,
    /// One-shot request for a full conducting half-cycle
    pub(crate) init_cycle: AtomicBool,
}

impl DimmerChannel {
    /// Create a channel in the fully-off, unsynchronized state
    pub const fn new(config: ChannelConfig, gate: &'static dyn GatePin) -> Self {
        Self {
            config,
            gate,
            duty: AtomicU16::new(0),
            cycle_length_us: AtomicU32::new(0),
            last_zero_cross_at: AtomicU32::new(0),
            enable_offset_us: AtomicU32::new(0),
            disable_offset_us: AtomicU32::new(0),
            init_cycle: AtomicBool::new(false),
        }
    }

    /// Get the channel configuration
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Identifier of the zero-cross source this channel listens to
    pub fn zero_cross_pin_id(&self) -> u32 {
        self.config.zero_cross_pin_id
    }

    /// Number of the gate pin this channel owns
    pub fn gate_pin_number(&self) -> u32 {
        self.gate.pin_number()
    }

    /// Current target duty
    pub fn duty(&self) -> DutyLevel {
        DutyLevel::from_raw(self.duty.load(Ordering::Relaxed))
    }

    /// Set the target duty; picked up at the next zero-cross or tick
    pub fn set_duty(&self, duty: DutyLevel) {
        self.duty.store(duty.raw(), Ordering::Relaxed);
    }

    /// Request one full conducting half-cycle at the next zero-cross
    pub fn request_init_cycle(&self) {
        self.init_cycle.store(true, Ordering::Relaxed);
    }

    /// Check whether a full half-cycle request is pending
    pub fn init_cycle_pending(&self) -> bool {
        self.init_cycle.load(Ordering::Relaxed)
    }

    /// Timestamp of the most recent accepted zero-cross edge
    pub fn last_zero_cross_at(&self) -> Micros {
        Micros::from_raw(self.last_zero_cross_at.load(Ordering::Relaxed))
    }

    /// Most recent measured half-cycle duration in microseconds
    pub fn cycle_length_us(&self) -> u32 {
        self.cycle_length_us.load(Ordering::Relaxed)
    }

    /// Pending gate-enable offset, `None` when no transition is scheduled
    ///
    /// The interrupt paths keep this as a plain integer with 0 meaning
    /// "nothing pending"; the sentinel only becomes an `Option` here.
    pub fn pending_enable_us(&self) -> Option<u32> {
        match self.enable_offset_us.load(Ordering::Relaxed) {
            0 => None,
            offset => Some(offset),
        }
    }

    /// Pending gate-disable offset, `None` when no transition is scheduled
    pub fn pending_disable_us(&self) -> Option<u32> {
        match self.disable_offset_us.load(Ordering::Relaxed) {
            0 => None,
            offset => Some(offset),
        }
    }

    /// Estimated mains frequency in Hz, once synchronized
    pub fn mains_frequency_hz(&self) -> Option<f32> {
        if self.last_zero_cross_at.load(Ordering::Relaxed) == 0 {
            return None;
        }
        let cycle = self.cycle_length_us.load(Ordering::Relaxed);
        if cycle == 0 {
            return None;
        }
        Some(1e6 / cycle as f32 / 2.0)
    }

    pub(crate) fn gate_write(&self, level: Level) {
        self.gate.set_level(level);
    }

    pub(crate) fn store_offsets(&self, enable_us: u32, disable_us: u32) {
        self.enable_offset_us.store(enable_us, Ordering::Relaxed);
        self.disable_offset_us.store(disable_us, Ordering::Relaxed);
    }

    /// Consume a pending full half-cycle request
    pub(crate) fn take_init_cycle(&self) -> bool {
        self.init_cycle.swap(false, Ordering::Relaxed)
    }
}
