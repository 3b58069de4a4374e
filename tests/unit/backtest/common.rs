//! Shared fixtures for backtest tests

use chrono::{Duration, TimeZone, Utc};
use ma_cross_rsi::config::{BacktestConfig, StrategyConfig};
use ma_cross_rsi::models::Candle;

/// Closes that produce one long entry (bar 6), a reversal into a short
/// (bar 11) and an open short at the end, with fast=2, slow=4, rsi=3.
pub const SCENARIO_CLOSES: [f64; 16] = [
    10.0, 9.8, 9.6, 9.7, 9.5, 9.6, 9.9, 9.8, 10.2, 10.4, 10.3, 10.0, 10.1, 9.7, 9.6, 9.7,
];

/// Each bar opens at the previous close.
pub fn scenario_candles(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle::new(
                open,
                open.max(close) + 0.05,
                open.min(close) - 0.05,
                close,
                1_000.0,
                start + Duration::hours(i as i64),
            )
        })
        .collect()
}

pub fn scenario_config() -> BacktestConfig {
    BacktestConfig {
        strategy: StrategyConfig {
            fast_ma_period: 2,
            slow_ma_period: 4,
            rsi_period: 3,
            ..StrategyConfig::default()
        },
        starting_balance: 1_000.0,
        fee_rate: 0.001,
        ..BacktestConfig::default()
    }
}
