#![no_std]
#![forbid(unsafe_code)]

//! # acdim Engine
//!
//! Zero-cross synchronized triac firing engine. A GPIO falling-edge
//! interrupt tracks the mains half-cycle per channel; a self-re-arming
//! timer interrupt fires the gate of every registered channel at its
//! computed phase angle.
//!
//! Channel state is shared between both interrupt contexts and the
//! application writer without locks: every mutable field is a single word
//! accessed with relaxed atomic loads and stores. A write landing
//! mid-cycle is observed either before or after a given interrupt, never
//! torn.

pub mod channel;
pub mod dimmer;
pub mod firing;
pub mod registry;
pub mod scheduler;
pub mod zero_cross;

pub use acdim_core::*;
pub use channel::*;
pub use dimmer::*;
pub use firing::*;
pub use registry::*;
pub use scheduler::*;
pub use zero_cross::*;
