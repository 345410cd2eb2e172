//! Deterministic simulation core for a single-screen maze-chase arcade game.
//!
//! The engine advances in fixed ticks: player movement, pellet consumption,
//! power-mode timing, adversary pursuit, then collision resolution. All
//! randomness lives outside the engine, so identical inputs replay into
//! identical runs.

pub mod ai;
pub mod autopilot;
pub mod constants;
pub mod engine;
pub mod entity;
pub mod grid;
pub mod types;
