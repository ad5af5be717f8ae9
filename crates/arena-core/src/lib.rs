//! Core types and definitions for the arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, components, host commands, configuration, snapshot
//! records, events, and constants. It has no dependency on the entity store
//! or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
