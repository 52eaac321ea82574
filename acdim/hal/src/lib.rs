//! Hardware abstraction layer for the acdim dimming engine
//!
//! Vendor-agnostic traits for the two platform services the engine
//! consumes: an edge-interrupt capable zero-cross input delivering
//! monotonic microsecond timestamps, and an interval timer that can be
//! re-armed from within its own interrupt callback.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod error;
pub mod gpio;
pub mod timer;

// Re-export commonly used types
pub use error::{HalError, HalResult};
