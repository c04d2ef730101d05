//! Round engine — the strategy → spin → settle loop.
//!
//! Each round asks the strategy for a color, spins the wheel, and moves
//! the balance by exactly one stake in either direction. Rounds are
//! strictly sequential since every balance depends on the previous one.

pub mod rng;
pub mod wheel;

use tracing::{debug, info, trace};

use crate::types::{Color, RoundResult, SimError, SimulationConfig, SimulationRun};
use rng::RandomSource;
use wheel::WheelMapping;

/// Plays a configured session against a wheel.
#[derive(Debug, Clone, Copy)]
pub struct RoundEngine {
    wheel: &'static WheelMapping,
}

impl RoundEngine {
    pub fn new() -> Self {
        Self {
            wheel: WheelMapping::european(),
        }
    }

    /// Run `config.rounds` rounds, drawing randomness from `source`.
    ///
    /// `rounds = 0` is valid and yields an empty trajectory. Fails with
    /// `InvalidConfiguration` on a negative bet or when the balance leaves
    /// the `Decimal` range, and with `OutOfRange` if the source ever
    /// produces a pocket past 36.
    pub fn run<S>(&self, config: &SimulationConfig, source: &mut S) -> Result<SimulationRun, SimError>
    where
        S: RandomSource + ?Sized,
    {
        config.validate()?;

        let mut run = SimulationRun::new(config.clone());
        let mut balance = run.starting_balance;
        let mut wins = 0u64;

        info!(
            run_id = %run.id,
            strategy = %config.strategy,
            bet = %config.bet,
            rounds = config.rounds,
            seed = ?config.seed,
            "Starting simulation"
        );

        for round in 0..config.rounds {
            let choice = config.strategy.choice(round, config.rounds, source);
            let pocket = source.draw_pocket();
            let outcome = self.wheel.color_of(pocket)?;

            let won = settle(outcome, choice);
            let settled = if won {
                wins += 1;
                balance.checked_add(config.bet)
            } else {
                balance.checked_sub(config.bet)
            };
            balance = settled.ok_or_else(|| {
                SimError::InvalidConfiguration(format!(
                    "balance overflow at round {round} (bet {})",
                    config.bet
                ))
            })?;

            trace!(round, pocket, %outcome, %choice, %balance, "Round settled");
            run.rounds.push(RoundResult {
                round,
                balance,
                choice,
            });
        }

        match run.end_balance() {
            Some(end) => info!(
                run_id = %run.id,
                end_balance = %end.normalize(),
                wins,
                losses = config.rounds - wins,
                "Simulation complete"
            ),
            None => debug!(run_id = %run.id, "Simulation complete with no rounds"),
        }

        Ok(run)
    }
}

impl Default for RoundEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a bet on `choice` wins against `outcome`. Green beats every bet.
fn settle(outcome: Color, choice: Color) -> bool {
    outcome == choice && outcome != Color::Green
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
