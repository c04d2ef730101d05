//! Betting strategies.
//!
//! A strategy decides which color to back in a given round. The set is
//! closed: unknown identifiers are rejected when parsed, never defaulted.

use std::fmt;

use crate::engine::rng::RandomSource;
use crate::types::{Color, SimError};

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Black every round.
    AlwaysBlack,
    /// Red every round.
    AlwaysRed,
    /// Fair coin between red and black, independently each round.
    Random,
    /// Black for the first half of the session, red for the rest.
    HalfAndHalf,
}

impl Strategy {
    /// All known strategies (useful for iteration).
    pub const ALL: &'static [Strategy] = &[
        Strategy::AlwaysBlack,
        Strategy::AlwaysRed,
        Strategy::Random,
        Strategy::HalfAndHalf,
    ];

    /// Identifier used in config files and on the dashboard.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::AlwaysBlack => "always_black",
            Strategy::AlwaysRed => "always_red",
            Strategy::Random => "random",
            Strategy::HalfAndHalf => "half_and_half",
        }
    }

    /// Color to bet on in `round` of a session lasting `total_rounds`.
    ///
    /// Only `Random` draws from `source`.
    pub fn choice<S>(&self, round: u64, total_rounds: u64, source: &mut S) -> Color
    where
        S: RandomSource + ?Sized,
    {
        match self {
            Strategy::AlwaysBlack => Color::Black,
            Strategy::AlwaysRed => Color::Red,
            Strategy::HalfAndHalf => {
                // round < total_rounds / 2 over the reals
                if round < total_rounds.div_ceil(2) {
                    Color::Black
                } else {
                    Color::Red
                }
            }
            Strategy::Random => {
                if source.coin_flip() {
                    Color::Red
                } else {
                    Color::Black
                }
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a strategy identifier (case-insensitive, `-` or `_` separators).
impl std::str::FromStr for Strategy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "always_black" => Ok(Strategy::AlwaysBlack),
            "always_red" => Ok(Strategy::AlwaysRed),
            "random" => Ok(Strategy::Random),
            "half_and_half" => Ok(Strategy::HalfAndHalf),
            _ => Err(SimError::InvalidStrategy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
