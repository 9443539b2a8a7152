//! Seeded token randomness
//!
//! Every random draw in the engine flows through [`TokenRng`] so a session is
//! fully reproducible from its seed. Uses PCG32, same as the wider game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::TokenKind;

/// Deterministic source of token draws
#[derive(Debug, Clone)]
pub struct TokenRng {
    seed: u64,
    rng: Pcg32,
}

impl TokenRng {
    /// Create a new source from a run seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The seed this source was created with (for restarting a run)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw one token kind, uniformly over all kinds
    pub fn draw(&mut self) -> TokenKind {
        let idx = self.rng.random_range(0..TokenKind::COUNT);
        TokenKind::ALL[idx]
    }
}
