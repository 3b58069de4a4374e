//! OHLCV CSV loading and validation.

use crate::error::DataError;
use crate::models::indicators::Candle;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Columns the input file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Load candles from a CSV file on disk.
pub fn load_candles<P: AsRef<Path>>(path: P) -> Result<Vec<Candle>, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let candles = read_candles(file)?;

    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        info!(
            path = %path.display(),
            bars = candles.len(),
            start = %first.timestamp,
            end = %last.timestamp,
            "Loaded {} bars",
            candles.len()
        );
    }

    Ok(candles)
}

/// Parse and validate candles from any CSV source.
///
/// Rows must be strictly increasing in time; the loader never re-sorts.
pub fn read_candles<R: Read>(source: R) -> Result<Vec<Candle>, DataError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column.to_string()));
        }
    }

    let mut candles: Vec<Candle> = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        // Header is line 1.
        let row = index + 2;
        let candle: Candle = result?;
        validate_candle(&candle, row)?;

        if let Some(previous) = candles.last() {
            if candle.timestamp <= previous.timestamp {
                return Err(DataError::Unordered {
                    row,
                    previous: previous.timestamp,
                    timestamp: candle.timestamp,
                });
            }
        }
        candles.push(candle);
    }

    if candles.is_empty() {
        return Err(DataError::EmptyData);
    }

    Ok(candles)
}

fn validate_candle(candle: &Candle, row: usize) -> Result<(), DataError> {
    let prices = [candle.open, candle.high, candle.low, candle.close];
    if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
        return Err(DataError::InvalidRow {
            row,
            reason: "prices must be finite and positive".to_string(),
        });
    }
    if candle.low > candle.high {
        return Err(DataError::InvalidRow {
            row,
            reason: format!("low {} above high {}", candle.low, candle.high),
        });
    }
    if !candle.volume.is_finite() || candle.volume < 0.0 {
        return Err(DataError::InvalidRow {
            row,
            reason: format!("invalid volume {}", candle.volume),
        });
    }
    Ok(())
}
