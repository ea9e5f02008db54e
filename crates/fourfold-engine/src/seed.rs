//! Seeded randomness for picking the starting player.
//!
//! The engine never owns a random source; callers pass one into
//! [`GameEngine::initialize`](crate::GameEngine::initialize). Hosts that
//! agree on a seed use [`seeded_rng`] so every node draws the same value.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic generator from a 4-byte big-endian seed.
pub fn seeded_rng(seed: [u8; 4]) -> StdRng {
    StdRng::seed_from_u64(u64::from(u32::from_be_bytes(seed)))
}
