//! Headless arena host.
//!
//! This crate drives the simulation from a real-time frame scheduler,
//! forwards host commands to it over a channel, and publishes the latest
//! snapshot for polling.

pub mod game_loop;
pub mod host;
pub mod state;
pub mod telemetry;

pub use arena_core as core;
