//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;
pub mod trade;

pub use indicators::{BarSnapshot, Candle};
pub use signal::Signal;
pub use trade::{EquityPoint, Fill, OrderSide, PositionRecord, PositionSide};
