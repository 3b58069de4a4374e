//! Market data ingestion.

pub mod loader;

pub use loader::{load_candles, read_candles, REQUIRED_COLUMNS};
