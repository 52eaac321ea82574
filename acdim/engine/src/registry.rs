//! Process-wide channel registry and interrupt fan-out

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use acdim_core::{DimError, DimResult, Micros};
use acdim_hal::gpio::EdgeHandler;
use acdim_hal::timer::TickHandler;

use crate::channel::DimmerChannel;

/// Maximum number of dimmer channels that can be registered
pub const MAX_CHANNELS: usize = 16;

/// Tick-rate floor: the shared timer never sleeps longer than this
pub const MIN_TICK_INTERVAL_US: u32 = 1_000;

/// Outcome of a successful channel registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// Slot assigned to the channel, stable for the process lifetime
    pub slot: usize,
    /// First channel referencing this zero-cross pin id; the caller
    /// performs the one physical edge-interrupt attachment
    pub first_for_pin: bool,
    /// First channel overall; the caller arms the shared firing timer
    pub first_overall: bool,
}

/// Fixed-capacity registry of dimmer channels
///
/// Channels register once at startup and are never removed. Entries are
/// `'static` handles into caller-owned channel state, so the registry
/// itself carries no per-channel locking; it only guards its own vector.
pub struct DimmerRegistry {
    channels: Vec<&'static DimmerChannel, MAX_CHANNELS>,
}

impl DimmerRegistry {
    /// Create a new empty registry
    pub const fn new() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    /// Register a channel
    ///
    /// Rejects a second channel on an already-owned gate pin and a full
    /// registry.
    pub fn register(&mut self, channel: &'static DimmerChannel) -> DimResult<Registration> {
        if self
            .channels
            .iter()
            .any(|c| c.gate_pin_number() == channel.gate_pin_number())
        {
            return Err(DimError::GatePinInUse);
        }
        let first_for_pin = !self
            .channels
            .iter()
            .any(|c| c.zero_cross_pin_id() == channel.zero_cross_pin_id());
        let first_overall = self.channels.is_empty();
        let slot = self.channels.len();
        self.channels
            .push(channel)
            .map_err(|_| DimError::RegistryFull)?;
        Ok(Registration {
            slot,
            first_for_pin,
            first_overall,
        })
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if no channels are registered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Fan one zero-cross edge out to every channel sharing `pin_id`
    ///
    /// Synchronous and in interrupt context, in registration order; edge
    /// latency grows with the number of channels sharing the line.
    pub fn notify_edge(&self, pin_id: u32, now: Micros) {
        for channel in self
            .channels
            .iter()
            .filter(|c| c.zero_cross_pin_id() == pin_id)
        {
            channel.handle_zero_cross(now);
        }
    }

    /// Tick every channel; returns the interval until the next tick
    ///
    /// The result is the smallest nonzero request from any channel, capped
    /// at `MIN_TICK_INTERVAL_US` so the tick stays responsive even when no
    /// channel has anything pending.
    pub fn service_all(&self, now: Micros) -> u32 {
        let mut next = MIN_TICK_INTERVAL_US;
        for channel in self.channels.iter() {
            let wanted = channel.service(now);
            if wanted != 0 && wanted < next {
                next = wanted;
            }
        }
        next
    }
}

impl Default for DimmerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry instance driven by the interrupt entry points below
static REGISTRY: Mutex<RefCell<DimmerRegistry>> = Mutex::new(RefCell::new(DimmerRegistry::new()));

/// Get access to the global channel registry
pub fn with_registry<F, R>(f: F) -> R
where
    F: FnOnce(&mut DimmerRegistry) -> R,
{
    critical_section::with(|cs| {
        let mut registry = REGISTRY.borrow_ref_mut(cs);
        f(&mut registry)
    })
}

/// Register a channel in the global registry
pub fn register_channel(channel: &'static DimmerChannel) -> DimResult<Registration> {
    with_registry(|registry| registry.register(channel))
}

/// Edge-interrupt entry point for the global registry
pub fn notify_zero_cross(pin_id: u32, now: Micros) {
    critical_section::with(|cs| REGISTRY.borrow_ref(cs).notify_edge(pin_id, now));
}

/// Timer-interrupt entry point for the global registry
pub fn service_channels(now: Micros) -> u32 {
    critical_section::with(|cs| REGISTRY.borrow_ref(cs).service_all(now))
}

/// Edge handler fanning one physical zero-cross line out to the registry
///
/// Const-constructible so one instance per line can live in a `static`,
/// giving the platform a fixed vtable with no allocation at attach time.
pub struct ZeroCrossFanout {
    pin_id: u32,
}

impl ZeroCrossFanout {
    /// Create a fan-out handler for the given zero-cross pin id
    pub const fn new(pin_id: u32) -> Self {
        Self { pin_id }
    }

    /// The zero-cross pin id this handler serves
    pub const fn pin_id(&self) -> u32 {
        self.pin_id
    }
}

impl EdgeHandler for ZeroCrossFanout {
    fn on_edge(&self, now_us: u32) {
        notify_zero_cross(self.pin_id, Micros::from_raw(now_us));
    }
}

/// Tick handler driving every registered channel from the shared timer
pub struct RegistryTick;

impl TickHandler for RegistryTick {
    fn on_tick(&self, now_us: u32) -> u32 {
        service_channels(Micros::from_raw(now_us))
    }
}

/// Shared tick handler instance for arming the platform timer
pub fn tick_handler() -> &'static dyn TickHandler {
    static TICK: RegistryTick = RegistryTick;
    &TICK
}
