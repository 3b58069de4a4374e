//! Moving-average crossover strategy with an RSI entry filter, plus a
//! one-shot CSV backtest runner built around it.

pub mod backtest;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod signals;
