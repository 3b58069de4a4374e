//! One-shot backtest over a loaded candle series.

pub mod engine;
pub mod export;
pub mod report;

pub use engine::{BacktestEngine, BacktestResult};
pub use export::{export_all, ExportedFiles};
pub use report::BacktestSummary;
