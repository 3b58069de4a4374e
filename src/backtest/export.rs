//! CSV and JSON output files for a finished run.

use crate::backtest::engine::BacktestResult;
use crate::backtest::report::BacktestSummary;
use crate::error::BacktestError;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

pub const FILLS_FILE: &str = "backtest_fills.csv";
pub const POSITIONS_FILE: &str = "backtest_positions.csv";
pub const EQUITY_FILE: &str = "equity_curve.csv";
pub const SUMMARY_FILE: &str = "backtest_summary.json";

pub const FILLS_HEADER: [&str; 6] = ["timestamp", "instrument", "side", "quantity", "price", "commission"];
pub const POSITIONS_HEADER: [&str; 7] = [
    "entry_time",
    "exit_time",
    "side",
    "quantity",
    "entry_price",
    "exit_price",
    "pnl",
];
pub const EQUITY_HEADER: [&str; 2] = ["timestamp", "equity"];

/// Paths of the files written by [`export_all`].
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub fills: PathBuf,
    pub positions: PathBuf,
    pub equity_curve: PathBuf,
    pub summary: PathBuf,
}

/// Write `rows` under `header`. The header is written even with no rows.
pub fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<(), BacktestError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_summary(path: &Path, summary: &BacktestSummary) -> Result<(), BacktestError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

pub fn export_all(
    result: &BacktestResult,
    summary: &BacktestSummary,
    output_dir: &Path,
) -> Result<ExportedFiles, BacktestError> {
    fs::create_dir_all(output_dir)?;

    let files = ExportedFiles {
        fills: output_dir.join(FILLS_FILE),
        positions: output_dir.join(POSITIONS_FILE),
        equity_curve: output_dir.join(EQUITY_FILE),
        summary: output_dir.join(SUMMARY_FILE),
    };

    write_csv(&files.fills, &FILLS_HEADER, &result.fills)?;
    info!(path = %files.fills.display(), rows = result.fills.len(), "Saved fills");

    write_csv(&files.positions, &POSITIONS_HEADER, &result.positions)?;
    info!(path = %files.positions.display(), rows = result.positions.len(), "Saved positions");

    write_csv(&files.equity_curve, &EQUITY_HEADER, &result.equity_curve)?;
    info!(path = %files.equity_curve.display(), rows = result.equity_curve.len(), "Saved equity curve");

    write_summary(&files.summary, summary)?;
    info!(path = %files.summary.display(), "Saved summary");

    Ok(files)
}
