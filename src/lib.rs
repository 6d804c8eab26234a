//! Simulation core for a sweeping-enemy arcade shooter.
//!
//! Everything in the library is renderer- and clock-agnostic: the host feeds
//! in key events, a millisecond timestamp and an RNG, and reads back a new
//! `GameState` plus draw calls through the `render::Surface` trait.

pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod feedback;
pub mod geometry;
pub mod input;
pub mod movement;
pub mod particles;
pub mod render;
pub mod spawner;
