//! Systems that operate on the arena world each tick.
//!
//! Systems are pure functions over `&mut World` plus the engine state they
//! are handed. They do not own state; everything lives in components, the
//! roster, or the engine.

pub mod area_pulse;
pub mod behavior;
pub mod cleanup;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
