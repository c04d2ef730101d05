//! Randomness seam for the round engine.
//!
//! The engine never touches an RNG directly; it asks a `RandomSource` for
//! pocket draws and coin flips so tests can script the wheel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::wheel::MAX_POCKET;
use crate::types::Pocket;

/// Source of the two random draws a round can need.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    /// A pocket drawn uniformly from 0..=36.
    fn draw_pocket(&mut self) -> Pocket;

    /// A fair coin flip.
    fn coin_flip(&mut self) -> bool;
}

/// `RandomSource` backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Seeded generator when `seed` is set, OS entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn draw_pocket(&mut self) -> Pocket {
        self.rng.gen_range(0..=MAX_POCKET)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}
