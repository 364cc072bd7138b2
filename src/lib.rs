//! Resonance Engine - party-based turn-resolution combat simulation
//!
//! Each round the engine decides who acts, in what order, whether consecutive
//! actions fuse into a named "resonance chain", and how resources evolve.
//! Everything is a deterministic function of battle state and a seeded RNG;
//! a presentation layer replays the emitted event sequence at its own pace.

pub mod battle;
pub mod catalog;
pub mod core;
pub mod party;
