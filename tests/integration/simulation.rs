//! End-to-end simulation harness.
//!
//! Drives config → engine → CSV/chart export the way the binary does,
//! with scripted and seeded wheels.

use rust_decimal_macros::dec;

use roulette::config::AppConfig;
use roulette::dashboard::chart;
use roulette::engine::rng::RngSource;
use roulette::engine::RoundEngine;
use roulette::storage;
use roulette::strategy::Strategy;
use roulette::types::{Color, SimError, SimulationConfig};

use crate::scripted_source::ScriptedSource;

fn temp_file(ext: &str) -> String {
    let mut p = std::env::temp_dir();
    p.push(format!("roulette_it_{}.{ext}", uuid::Uuid::new_v4()));
    p.to_string_lossy().to_string()
}

#[test]
fn test_scripted_always_black_end_to_end() {
    let config = SimulationConfig::new(dec!(5), 3, Strategy::AlwaysBlack);
    let mut source = ScriptedSource::new(&[2, 1, 0]);

    let run = RoundEngine::new().run(&config, &mut source).unwrap();

    assert_eq!(run.balances().collect::<Vec<_>>(), vec![dec!(105), dec!(100), dec!(95)]);
    assert_eq!(source.remaining(), (0, 0));
    assert_eq!(source.flips_drawn, 0);
    assert_eq!(source.pockets_drawn, 3);

    let mut buf = Vec::new();
    storage::write_csv(&run, &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "round,balance,choices\n0,105,Black\n1,100,Black\n2,95,Black\n"
    );
}

#[test]
fn test_random_strategy_draws_one_flip_per_round() {
    let config = SimulationConfig::new(dec!(1), 4, Strategy::Random);
    let mut source = ScriptedSource::new(&[1, 2, 3, 4]).with_flips(&[true, true, false, false]);

    let run = RoundEngine::new().run(&config, &mut source).unwrap();

    let choices: Vec<Color> = run.rounds.iter().map(|r| r.choice).collect();
    assert_eq!(choices, vec![Color::Red, Color::Red, Color::Black, Color::Black]);
    // 1 red (win), 2 black (lose), 3 red (lose), 4 black (win)
    assert_eq!(run.balances().collect::<Vec<_>>(), vec![dec!(101), dec!(100), dec!(99), dec!(100)]);
    assert_eq!(source.flips_drawn, 4);
}

#[test]
fn test_half_and_half_switches_at_midpoint() {
    let config = SimulationConfig::new(dec!(5), 10, Strategy::HalfAndHalf);
    let mut source = ScriptedSource::new(&[0; 10]);

    let run = RoundEngine::new().run(&config, &mut source).unwrap();

    for r in &run.rounds {
        let expected = if r.round < 5 { Color::Black } else { Color::Red };
        assert_eq!(r.choice, expected, "round {}", r.round);
    }
    assert_eq!(run.final_balance(), dec!(50));
}

#[test]
fn test_export_matches_final_balance() {
    let config = SimulationConfig::new(dec!(5), 250, Strategy::Random).with_seed(77);
    let run = RoundEngine::new()
        .run(&config, &mut RngSource::from_seed(config.seed))
        .unwrap();

    let path = temp_file("csv");
    let rows = storage::export_csv(&run, Some(&path)).unwrap();
    assert_eq!(rows, 250);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "round,balance,choices");
    assert_eq!(lines.len(), 251);

    let last: Vec<&str> = lines[250].split(',').collect();
    assert_eq!(last[0], "249");
    assert_eq!(last[1], run.final_balance().normalize().to_string());
    assert!(last[2] == "Red" || last[2] == "Black");

    storage::delete_export(&path).unwrap();
}

#[test]
fn test_config_to_chart_pipeline() {
    let mut cfg = AppConfig::parse(
        "[simulation]\nbet = 5\nrounds = 40\nstrategy = \"always_red\"\nseed = 1\n",
    )
    .unwrap();
    cfg.output.chart_path = temp_file("svg");

    let sim = cfg.simulation_config().unwrap();
    sim.validate_for_output().unwrap();
    let run = RoundEngine::new()
        .run(&sim, &mut RngSource::from_seed(sim.seed))
        .unwrap();
    chart::write_svg(&run, &cfg.output.chart_path).unwrap();

    let svg = std::fs::read_to_string(&cfg.output.chart_path).unwrap();
    assert!(svg.contains("Strategy = always_red"));
    assert!(svg.contains(&format!("End balance = {}", run.final_balance().normalize())));
    std::fs::remove_file(&cfg.output.chart_path).unwrap();
}

#[test]
fn test_zero_rounds_rejected_for_output() {
    let cfg = AppConfig::parse("[simulation]\nrounds = 0\n").unwrap();
    let sim = cfg.simulation_config().unwrap();
    assert!(matches!(sim.validate_for_output(), Err(SimError::InvalidConfiguration(_))));

    let run = RoundEngine::new().run(&sim, &mut ScriptedSource::default()).unwrap();
    assert!(run.end_balance().is_none());
}

#[test]
fn test_seeded_balances_move_by_one_stake() {
    for strategy in Strategy::ALL {
        let config = SimulationConfig::new(dec!(3), 1000, *strategy).with_seed(12345);
        let run = RoundEngine::new()
            .run(&config, &mut RngSource::from_seed(config.seed))
            .unwrap();
        let balances: Vec<_> = run.balances().collect();
        for pair in balances.windows(2) {
            assert_eq!((pair[1] - pair[0]).abs(), dec!(3));
        }
    }
}

#[test]
fn test_oversized_bet_from_config_returns_error() {
    // Two equal outcomes in a row at this stake leave the Decimal range.
    let cfg = AppConfig::parse(
        "[simulation]\nbet = 5e28\nrounds = 3\nstrategy = \"always_black\"\nseed = 1\n",
    )
    .unwrap();
    let config = cfg.simulation_config().unwrap();
    let mut source = ScriptedSource::new(&[1, 1, 1]);

    let err = RoundEngine::new().run(&config, &mut source).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration(ref m) if m.contains("overflow")));
    assert_eq!(source.pockets_drawn, 2);
}
