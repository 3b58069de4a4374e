//! Environment-driven configuration.
//!
//! Values are read from the process environment (optionally seeded from a
//! `.env` file by the binary). Unparseable values fall back to defaults;
//! `validate()` rejects combinations that cannot produce a meaningful run.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// RSI entry filter bounds.
///
/// Long entries require `rsi < overbought`, short entries `rsi > oversold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiThresholds {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl RsiThresholds {
    pub fn new(oversold: f64, overbought: f64) -> Result<Self, ConfigError> {
        let thresholds = Self {
            overbought,
            oversold,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.oversold) || !in_range(self.overbought) || self.oversold >= self.overbought
        {
            return Err(ConfigError::InvalidThresholds {
                oversold: self.oversold,
                overbought: self.overbought,
            });
        }
        Ok(())
    }
}

/// Indicator periods and entry filter for the crossover strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub instrument_id: String,
    pub fast_ma_period: usize,
    pub slow_ma_period: usize,
    pub rsi_period: usize,
    pub thresholds: RsiThresholds,
    pub trade_size: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            instrument_id: "TEST.SIM".to_string(),
            fast_ma_period: 20,
            slow_ma_period: 50,
            rsi_period: 14,
            thresholds: RsiThresholds::default(),
            trade_size: 1.0,
        }
    }
}

impl StrategyConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            instrument_id: env::var("INSTRUMENT_ID").unwrap_or(defaults.instrument_id),
            fast_ma_period: env_or("FAST_MA_PERIOD", defaults.fast_ma_period),
            slow_ma_period: env_or("SLOW_MA_PERIOD", defaults.slow_ma_period),
            rsi_period: env_or("RSI_PERIOD", defaults.rsi_period),
            thresholds: RsiThresholds {
                overbought: env_or("RSI_OVERBOUGHT", defaults.thresholds.overbought),
                oversold: env_or("RSI_OVERSOLD", defaults.thresholds.oversold),
            },
            trade_size: env_or("TRADE_SIZE", defaults.trade_size),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("fast_ma_period", self.fast_ma_period),
            ("slow_ma_period", self.slow_ma_period),
            ("rsi_period", self.rsi_period),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidPeriod { name, value });
            }
        }
        self.thresholds.validate()?;
        if !(self.trade_size.is_finite() && self.trade_size > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "trade_size",
                value: self.trade_size,
            });
        }
        Ok(())
    }

    /// Bars consumed before the first snapshot is produced.
    pub fn warmup_bars(&self) -> usize {
        self.fast_ma_period
            .max(self.slow_ma_period)
            .max(self.rsi_period + 1)
    }
}

/// Everything a single backtest run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub strategy: StrategyConfig,
    pub starting_balance: f64,
    pub fee_rate: f64,
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyConfig::default(),
            starting_balance: 100_000.0,
            fee_rate: 0.0001,
            data_path: PathBuf::from("ohlcv.csv"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl BacktestConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            strategy: StrategyConfig::from_env(),
            starting_balance: env_or("STARTING_BALANCE", defaults.starting_balance),
            fee_rate: env_or("FEE_RATE", defaults.fee_rate),
            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategy.validate()?;
        if !(self.starting_balance.is_finite() && self.starting_balance > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "starting_balance",
                value: self.starting_balance,
            });
        }
        if !(self.fee_rate.is_finite() && self.fee_rate >= 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "fee_rate",
                value: self.fee_rate,
            });
        }
        Ok(())
    }
}
