//! Scripted random source for integration testing.
//!
//! Replays a fixed list of pockets and coin flips so full runs are
//! deterministic end to end.

use std::collections::VecDeque;

use roulette::engine::rng::RandomSource;
use roulette::types::Pocket;

/// A `RandomSource` that replays scripted draws in order.
///
/// Panics when the script runs out, which makes an unexpected extra
/// draw fail the test loudly.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pockets: VecDeque<Pocket>,
    flips: VecDeque<bool>,
    pub pockets_drawn: usize,
    pub flips_drawn: usize,
}

impl ScriptedSource {
    pub fn new(pockets: &[Pocket]) -> Self {
        Self {
            pockets: pockets.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn with_flips(mut self, flips: &[bool]) -> Self {
        self.flips = flips.iter().copied().collect();
        self
    }

    /// Scripted draws not consumed yet.
    pub fn remaining(&self) -> (usize, usize) {
        (self.pockets.len(), self.flips.len())
    }
}

impl RandomSource for ScriptedSource {
    fn draw_pocket(&mut self) -> Pocket {
        self.pockets_drawn += 1;
        self.pockets.pop_front().expect("pocket script exhausted")
    }

    fn coin_flip(&mut self) -> bool {
        self.flips_drawn += 1;
        self.flips.pop_front().expect("coin flip script exhausted")
    }
}
