use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar as read from the input CSV.
///
/// `timestamp` is stored in Unix seconds on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Indicator values for a single closed bar, consumed once by the
/// crossover generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSnapshot {
    pub timestamp: DateTime<Utc>,
    pub fast_ma: f64,
    pub slow_ma: f64,
    pub rsi: f64,
}

impl BarSnapshot {
    pub fn new(timestamp: DateTime<Utc>, fast_ma: f64, slow_ma: f64, rsi: f64) -> Self {
        Self {
            timestamp,
            fast_ma,
            slow_ma,
            rsi,
        }
    }
}
