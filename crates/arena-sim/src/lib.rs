//! Simulation engine for the arena.
//!
//! Owns the hecs world holding the mob population, runs the per-tick systems
//! against a host-supplied elapsed delta, and produces `ArenaSnapshot`s.

pub mod combat;
pub mod combo;
pub mod engine;
pub mod events;
pub mod population;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use engine::ArenaEngine;
