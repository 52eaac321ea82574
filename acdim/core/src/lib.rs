#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # acdim Core
//!
//! Core value types for the acdim phase-control dimming engine: normalized
//! actuation levels, wrapping microsecond timestamps, firing methods, and
//! the set-once channel configuration consumed by the engine crate.

use core::fmt;

pub mod config;
pub mod duty;
pub mod method;
pub mod time;

pub use config::*;
pub use duty::*;
pub use method::*;
pub use time::*;

/// acdim version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the acdim crates
pub type DimResult<T> = Result<T, DimError>;

/// Error types for dimmer setup and registration
///
/// Everything here is fatal at setup time. Once a channel is running there
/// is no error path: an unsynchronized channel no-ops and implausible gate
/// offsets are prevented by clamped arithmetic inputs, not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimError {
    /// Channel registry is full
    RegistryFull,
    /// Another channel already owns this gate pin
    GatePinInUse,
    /// Edge handler pin id does not match the channel configuration
    ZeroCrossMismatch,
    /// Invalid channel configuration
    InvalidConfig,
    /// Zero-cross edge interrupt could not be attached
    Interrupt,
    /// Shared firing timer could not be armed
    Timer,
}

impl fmt::Display for DimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimError::RegistryFull => write!(f, "Channel registry is full"),
            DimError::GatePinInUse => write!(f, "Gate pin already owned by another channel"),
            DimError::ZeroCrossMismatch => write!(f, "Zero-cross pin does not match configuration"),
            DimError::InvalidConfig => write!(f, "Invalid channel configuration"),
            DimError::Interrupt => write!(f, "Zero-cross interrupt attachment failed"),
            DimError::Timer => write!(f, "Shared firing timer could not be armed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DimError {}

#[cfg(feature = "defmt")]
impl defmt::Format for DimError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DimError::RegistryFull => defmt::write!(fmt, "RegistryFull"),
            DimError::GatePinInUse => defmt::write!(fmt, "GatePinInUse"),
            DimError::ZeroCrossMismatch => defmt::write!(fmt, "ZeroCrossMismatch"),
            DimError::InvalidConfig => defmt::write!(fmt, "InvalidConfig"),
            DimError::Interrupt => defmt::write!(fmt, "Interrupt"),
            DimError::Timer => defmt::write!(fmt, "Timer"),
        }
    }
}
