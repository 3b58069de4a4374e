//! Error types shared across the crate.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while loading or validating OHLCV data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// Timestamps must be strictly increasing.
    #[error("unordered data at row {row}: {timestamp} does not follow {previous}")]
    Unordered {
        row: usize,
        previous: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },

    #[error("empty data")]
    EmptyData,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Precondition violations reported by the signal generator.
///
/// These are caller bugs: the generator refuses the bar and keeps its state.
#[derive(Debug, Error, PartialEq)]
pub enum SignalError {
    #[error("non-monotonic bar: {timestamp} is not after {previous}")]
    NonMonotonic {
        previous: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },

    #[error("undefined indicator value {name}={value} at {timestamp}")]
    UndefinedIndicator {
        name: &'static str,
        value: f64,
        timestamp: DateTime<Utc>,
    },
}

/// Inconsistent strategy or backtest configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid period for {name}: {value}")]
    InvalidPeriod { name: &'static str, value: usize },

    #[error("invalid RSI thresholds: oversold={oversold}, overbought={overbought}")]
    InvalidThresholds { oversold: f64, overbought: f64 },

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },
}

/// Errors that can abort a backtest run.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("insufficient data: need {required}, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BacktestError {
    /// Coarse category used in log output.
    pub fn category(&self) -> &'static str {
        match self {
            BacktestError::Config(_) => "config",
            BacktestError::Data(_) | BacktestError::InsufficientData { .. } => "market_data",
            BacktestError::Signal(_) => "strategy",
            BacktestError::Io(_) | BacktestError::Csv(_) | BacktestError::Json(_) => "output",
        }
    }
}
