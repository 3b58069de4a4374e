//! Unit tests for the backtest engine

use super::backtest_common::{scenario_candles, scenario_config, SCENARIO_CLOSES};
use ma_cross_rsi::backtest::BacktestEngine;
use ma_cross_rsi::config::BacktestConfig;
use ma_cross_rsi::error::{BacktestError, ConfigError};
use ma_cross_rsi::models::{OrderSide, PositionSide};

const EPS: f64 = 1e-9;

#[test]
fn test_scenario_fills_on_next_open() {
    let candles = scenario_candles(&SCENARIO_CLOSES);
    let engine = BacktestEngine::new(scenario_config()).unwrap();
    let result = engine.run(&candles).unwrap();

    assert_eq!(result.long_signals, 1);
    assert_eq!(result.short_signals, 1);
    // Warm-up consumes the first 3 bars.
    assert_eq!(result.bars_evaluated, 13);

    let sides: Vec<OrderSide> = result.fills.iter().map(|f| f.side).collect();
    assert_eq!(
        sides,
        vec![OrderSide::Buy, OrderSide::Sell, OrderSide::Sell, OrderSide::Buy]
    );

    // Long decided at bar 6, executed at bar 7's open.
    assert_eq!(result.fills[0].timestamp, candles[7].timestamp);
    assert!((result.fills[0].price - candles[7].open).abs() < EPS);
    // Reversal at bar 12's open: close the long, open the short.
    assert_eq!(result.fills[1].timestamp, candles[12].timestamp);
    assert_eq!(result.fills[2].timestamp, candles[12].timestamp);
    // End-of-run flattening at the final close.
    assert_eq!(result.fills[3].timestamp, candles[15].timestamp);
    assert!((result.fills[3].price - 9.7).abs() < EPS);
    assert!((result.fills[0].commission - 9.9 * 0.001).abs() < EPS);
}

#[test]
fn test_scenario_positions_and_balance() {
    let candles = scenario_candles(&SCENARIO_CLOSES);
    let result = BacktestEngine::new(scenario_config())
        .unwrap()
        .run(&candles)
        .unwrap();

    assert_eq!(result.positions.len(), 2);
    let long = &result.positions[0];
    assert_eq!(long.side, PositionSide::Long);
    assert!((long.entry_price - 9.9).abs() < EPS);
    assert!((long.exit_price - 10.0).abs() < EPS);
    assert!((long.pnl - (0.1 - 0.0099 - 0.01)).abs() < EPS);

    let short = &result.positions[1];
    assert_eq!(short.side, PositionSide::Short);
    assert!((short.pnl - (0.3 - 0.01 - 0.0097)).abs() < EPS);

    // Balance reconciles with closed positions once flat.
    let total: f64 = result.positions.iter().map(|p| p.pnl).sum();
    assert!((result.ending_balance - result.starting_balance - total).abs() < EPS);
    assert!((result.ending_balance - 1_000.3604).abs() < EPS);
}

#[test]
fn test_scenario_equity_curve() {
    let candles = scenario_candles(&SCENARIO_CLOSES);
    let result = BacktestEngine::new(scenario_config())
        .unwrap()
        .run(&candles)
        .unwrap();

    assert_eq!(result.equity_curve.len(), result.bars_evaluated);
    assert_eq!(result.equity_curve[0].timestamp, candles[3].timestamp);
    assert!((result.equity_curve[0].equity - 1_000.0).abs() < EPS);
    // Entry commission is realized on the fill bar.
    assert!((result.equity_curve[4].equity - (1_000.0 - 0.0099)).abs() < EPS);
    // Final point includes the flattening trade.
    let last = result.equity_curve.last().unwrap();
    assert_eq!(last.timestamp, candles[15].timestamp);
    assert!((last.equity - result.ending_balance).abs() < EPS);
}

#[test]
fn test_signal_on_final_bar_is_dropped() {
    // Truncate right after the long signal bar.
    let candles = scenario_candles(&SCENARIO_CLOSES[..7]);
    let result = BacktestEngine::new(scenario_config())
        .unwrap()
        .run(&candles)
        .unwrap();

    assert_eq!(result.long_signals, 1);
    assert!(result.fills.is_empty());
    assert!(result.positions.is_empty());
    assert!((result.ending_balance - 1_000.0).abs() < EPS);
}

#[test]
fn test_future_bars_do_not_change_past_fills() {
    let candles = scenario_candles(&SCENARIO_CLOSES);
    let engine = BacktestEngine::new(scenario_config()).unwrap();
    let full = engine.run(&candles).unwrap();
    let truncated = engine.run(&candles[..12]).unwrap();

    // Bars up to 11 are shared: the long entry must match.
    assert_eq!(truncated.fills[0], full.fills[0]);
    assert_eq!(truncated.equity_curve[..8], full.equity_curve[..8]);
}

#[test]
fn test_insufficient_data() {
    let candles = scenario_candles(&SCENARIO_CLOSES[..5]);
    let engine = BacktestEngine::new(scenario_config()).unwrap();
    assert_eq!(engine.required_bars(), 6);

    match engine.run(&candles) {
        Err(BacktestError::InsufficientData {
            required,
            available,
        }) => {
            assert_eq!(required, 6);
            assert_eq!(available, 5);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn test_minimum_bars_can_trade() {
    // Indicator warm-up (bars 0-3), generator warm-up (bar 3), a long
    // decision on bar 4 and its fill on bar 5.
    let candles = scenario_candles(&[10.0, 9.8, 9.6, 9.5, 10.0, 10.1]);
    let engine = BacktestEngine::new(scenario_config()).unwrap();
    assert_eq!(candles.len(), engine.required_bars());

    let result = engine.run(&candles).unwrap();
    assert_eq!(result.bars_evaluated, 3);
    assert_eq!(result.long_signals, 1);
    assert_eq!(result.fills.len(), 2);
    assert_eq!(result.fills[0].timestamp, candles[5].timestamp);
    assert!((result.fills[0].price - 10.0).abs() < EPS);
    assert_eq!(result.positions.len(), 1);
    assert!((result.ending_balance - 1_000.0799).abs() < EPS);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = scenario_config();
    config.strategy.rsi_period = 0;
    let err = BacktestEngine::new(config).err().unwrap();
    assert!(matches!(
        err,
        BacktestError::Config(ConfigError::InvalidPeriod {
            name: "rsi_period",
            value: 0
        })
    ));
    assert_eq!(err.category(), "config");

    let config = BacktestConfig {
        fee_rate: -0.1,
        ..scenario_config()
    };
    assert!(BacktestEngine::new(config).is_err());
}

#[test]
fn test_zero_fee_run_is_deterministic() {
    let candles = scenario_candles(&SCENARIO_CLOSES);
    let config = BacktestConfig {
        fee_rate: 0.0,
        ..scenario_config()
    };
    let engine = BacktestEngine::new(config).unwrap();
    let first = engine.run(&candles).unwrap();
    let second = engine.run(&candles).unwrap();

    assert_eq!(first.fills, second.fills);
    assert!((first.ending_balance - 1_000.4).abs() < EPS);
    assert!(first.fills.iter().all(|f| f.commission == 0.0));
}
