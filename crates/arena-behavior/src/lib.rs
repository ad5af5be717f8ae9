//! Mob behavior for the arena simulation.
//!
//! Implements the per-tick intent function for each behavior kind, position
//! stepping, and strafe persistence for ranged kiters.

pub mod intent;
pub mod strafe;

pub use arena_core as core;
