//! Configuration loading from TOML with environment variable overrides.
//!
//! Reads `config.toml` (all sections optional; defaults are bet 5,
//! 1000 rounds, random strategy) and then applies any `ROULETTE_*`
//! environment variables on top.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::storage::DEFAULT_CSV_FILE;
use crate::strategy::Strategy;
use crate::types::{SimError, SimulationConfig};

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Default chart output path.
pub const DEFAULT_CHART_FILE: &str = "simulation_chart.svg";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationSection,
    pub output: OutputConfig,
    pub dashboard: DashboardConfig,
}

/// Raw `[simulation]` section. The strategy stays a string here so an
/// unknown identifier surfaces as `InvalidStrategy`, not a TOML error;
/// `rounds` is signed for the same reason with negative counts.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationSection {
    pub bet: Decimal,
    pub rounds: i64,
    pub strategy: String,
    pub seed: Option<u64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            bet: dec!(5),
            rounds: 1000,
            strategy: Strategy::Random.to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: String,
    pub chart_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV_FILE.to_string(),
            chart_path: DEFAULT_CHART_FILE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load configuration from `path`, or defaults if the file is absent.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `ROULETTE_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), SimError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SimError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ROULETTE_BET") {
            self.simulation.bet = parse_override("ROULETTE_BET", &v)?;
        }
        if let Some(v) = lookup("ROULETTE_ROUNDS") {
            self.simulation.rounds = parse_override("ROULETTE_ROUNDS", &v)?;
        }
        if let Some(v) = lookup("ROULETTE_STRATEGY") {
            self.simulation.strategy = v;
        }
        if let Some(v) = lookup("ROULETTE_SEED") {
            self.simulation.seed = Some(parse_override("ROULETTE_SEED", &v)?);
        }
        if let Some(v) = lookup("ROULETTE_OUTPUT") {
            self.output.csv_path = v;
        }
        if let Some(v) = lookup("ROULETTE_CHART") {
            self.output.chart_path = v;
        }
        if let Some(v) = lookup("ROULETTE_DASHBOARD") {
            self.dashboard.enabled = parse_override("ROULETTE_DASHBOARD", &v)?;
        }
        if let Some(v) = lookup("ROULETTE_DASHBOARD_PORT") {
            self.dashboard.port = parse_override("ROULETTE_DASHBOARD_PORT", &v)?;
        }
        Ok(())
    }

    /// Resolve the `[simulation]` section into a validated run config.
    pub fn simulation_config(&self) -> Result<SimulationConfig, SimError> {
        let strategy: Strategy = self.simulation.strategy.parse()?;
        let rounds = u64::try_from(self.simulation.rounds).map_err(|_| {
            SimError::InvalidConfiguration(format!(
                "rounds must not be negative (got {})",
                self.simulation.rounds
            ))
        })?;
        let mut config = SimulationConfig::new(self.simulation.bet, rounds, strategy);
        config.seed = self.simulation.seed;
        config.validate()?;
        Ok(config)
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T, SimError> {
    value
        .trim()
        .parse()
        .map_err(|_| SimError::InvalidConfiguration(format!("{key} has invalid value: {value}")))
}
