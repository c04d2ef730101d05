//! Shared types for the roulette simulator.
//!
//! These types form the data model used across all modules: the wheel,
//! the round engine, the CSV writer, the chart and the dashboard all
//! speak in terms of `Color`, `RoundResult` and `SimulationRun`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::strategy::Strategy;

/// A numbered compartment of the wheel, 0 through 36.
pub type Pocket = u8;

/// Balance every run starts with, before round 0.
pub const STARTING_BALANCE: Decimal = Decimal::ONE_HUNDRED;

/// Upper bound on the trajectory capacity reserved up front.
const MAX_PREALLOCATED_ROUNDS: usize = 1 << 20;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The marking of a pocket. Players may only bet on `Red` or `Black`;
/// `Green` is the zero pocket and beats every bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
    Green,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
            Color::Green => write!(f, "Green"),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

/// Validated parameters for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Stake placed every round. Zero is allowed and freezes the balance.
    pub bet: Decimal,
    /// Number of rounds to play.
    pub rounds: u64,
    pub strategy: Strategy,
    /// Fixed RNG seed for reproducible runs; entropy when `None`.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(bet: Decimal, rounds: u64, strategy: Strategy) -> Self {
        Self {
            bet,
            rounds,
            strategy,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the invariants the round engine relies on.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.bet < Decimal::ZERO {
            return Err(SimError::InvalidConfiguration(format!(
                "bet must not be negative (got {})",
                self.bet
            )));
        }
        Ok(())
    }

    /// Stricter check used by the driver: exporting and charting need at
    /// least one round to describe.
    pub fn validate_for_output(&self) -> Result<(), SimError> {
        self.validate()?;
        if self.rounds == 0 {
            return Err(SimError::InvalidConfiguration(
                "rounds must be at least 1 to produce output".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "strategy={} bet={} rounds={}",
            self.strategy, self.bet, self.rounds
        )?;
        if let Some(seed) = self.seed {
            write!(f, " seed={seed}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Round results
// ---------------------------------------------------------------------------

/// Outcome of a single round, as recorded in the trajectory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Zero-based round index.
    pub round: u64,
    /// Balance after this round was settled.
    pub balance: Decimal,
    /// Color the strategy bet on.
    pub choice: Color,
}

/// A finished simulation: configuration plus the full balance trajectory.
///
/// Built by `RoundEngine::run` and handed read-only to the CSV writer,
/// the chart renderer and the dashboard.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub config: SimulationConfig,
    pub starting_balance: Decimal,
    pub rounds: Vec<RoundResult>,
}

impl SimulationRun {
    pub fn new(config: SimulationConfig) -> Self {
        let capacity = usize::try_from(config.rounds).unwrap_or(0).min(MAX_PREALLOCATED_ROUNDS);
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            config,
            starting_balance: STARTING_BALANCE,
            rounds: Vec::with_capacity(capacity),
        }
    }

    /// Balance after the last round, or `None` when no round was played.
    pub fn end_balance(&self) -> Option<Decimal> {
        self.rounds.last().map(|r| r.balance)
    }

    /// Balance after the last round, falling back to the starting balance.
    pub fn final_balance(&self) -> Decimal {
        self.end_balance().unwrap_or(self.starting_balance)
    }

    /// Net result of the run.
    pub fn pnl(&self) -> Decimal {
        self.final_balance() - self.starting_balance
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Balance after each round, in round order.
    pub fn balances(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.rounds.iter().map(|r| r.balance)
    }
}

impl fmt::Display for SimulationRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_balance() {
            Some(end) => write!(
                f,
                "Run {}: {} | end balance {}",
                self.id,
                self.config,
                end.normalize()
            ),
            None => write!(f, "Run {}: {} | no rounds played", self.id, self.config),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the simulator.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Pocket {0} is out of range (expected 0-36)")]
    OutOfRange(Pocket),

    #[error("Unknown strategy: {0} (expected always_black, always_red, random or half_and_half)")]
    InvalidStrategy(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
