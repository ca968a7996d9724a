// src/genres/mod.rs

// High-level "genre" orchestrations that coordinate multiple systems.
// Each genre is feature-gated so downstream callers enable only what they use.

#[cfg(feature = "genre-arcade")]
pub mod arcade;

#[cfg(feature = "genre-arcade")]
pub use arcade::*;
