//! Bar-by-bar backtest driver.
//!
//! Each candle is pushed through the indicator pipeline and the crossover
//! generator at its close. Entries are filled as market orders at the
//! next bar's open, so a decision never trades on the bar that produced
//! it. Any position still open after the last bar is closed at its close.

use crate::config::BacktestConfig;
use crate::error::BacktestError;
use crate::indicators::IndicatorPipeline;
use crate::models::indicators::Candle;
use crate::models::signal::Signal;
use crate::models::trade::{EquityPoint, Fill, OrderSide, PositionRecord, PositionSide};
use crate::signals::CrossoverSignalGenerator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything produced by one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub instrument: String,
    pub starting_balance: f64,
    pub ending_balance: f64,
    pub bars_loaded: usize,
    pub bars_evaluated: usize,
    pub long_signals: usize,
    pub short_signals: usize,
    pub fills: Vec<Fill>,
    pub positions: Vec<PositionRecord>,
    pub equity_curve: Vec<EquityPoint>,
}

#[derive(Debug, Clone)]
struct OpenPosition {
    side: PositionSide,
    quantity: f64,
    entry_price: f64,
    entry_time: DateTime<Utc>,
    entry_commission: f64,
}

/// Simulated single-instrument account.
#[derive(Debug)]
struct Account {
    instrument: String,
    fee_rate: f64,
    balance: f64,
    position: Option<OpenPosition>,
    fills: Vec<Fill>,
    positions: Vec<PositionRecord>,
}

impl Account {
    fn new(instrument: String, balance: f64, fee_rate: f64) -> Self {
        Self {
            instrument,
            fee_rate,
            balance,
            position: None,
            fills: Vec::new(),
            positions: Vec::new(),
        }
    }

    fn commission(&self, price: f64, quantity: f64) -> f64 {
        price * quantity * self.fee_rate
    }

    /// Move toward `target`: reverse an opposite position, open from flat,
    /// ignore when already positioned that way.
    fn enter(&mut self, target: PositionSide, quantity: f64, price: f64, at: DateTime<Utc>) {
        match self.position.as_ref().map(|p| p.side) {
            Some(side) if side == target => {
                debug!(side = %side, "already positioned, entry ignored");
                return;
            }
            Some(_) => {
                info!(side = %target, "reversing position");
                self.close(price, at);
            }
            None => {}
        }
        self.open(target, quantity, price, at);
    }

    fn open(&mut self, side: PositionSide, quantity: f64, price: f64, at: DateTime<Utc>) {
        let commission = self.commission(price, quantity);
        self.balance -= commission;
        self.record_fill(side.entry_side(), quantity, price, commission, at);
        self.position = Some(OpenPosition {
            side,
            quantity,
            entry_price: price,
            entry_time: at,
            entry_commission: commission,
        });
    }

    fn close(&mut self, price: f64, at: DateTime<Utc>) {
        let Some(position) = self.position.take() else {
            return;
        };

        let commission = self.commission(price, position.quantity);
        let gross = match position.side {
            PositionSide::Long => (price - position.entry_price) * position.quantity,
            PositionSide::Short => (position.entry_price - price) * position.quantity,
        };
        self.balance += gross - commission;
        self.record_fill(
            position.side.exit_side(),
            position.quantity,
            price,
            commission,
            at,
        );

        let pnl = gross - commission - position.entry_commission;
        info!(side = %position.side, entry = position.entry_price, exit = price, pnl, "position closed");
        self.positions.push(PositionRecord {
            entry_time: position.entry_time,
            exit_time: at,
            side: position.side,
            quantity: position.quantity,
            entry_price: position.entry_price,
            exit_price: price,
            pnl,
        });
    }

    fn record_fill(
        &mut self,
        side: OrderSide,
        quantity: f64,
        price: f64,
        commission: f64,
        at: DateTime<Utc>,
    ) {
        debug!(side = %side, price, quantity, commission, "fill");
        self.fills.push(Fill {
            timestamp: at,
            instrument: self.instrument.clone(),
            side,
            quantity,
            price,
            commission,
        });
    }
}

fn target_side(signal: Signal) -> Option<PositionSide> {
    match signal {
        Signal::EnterLong => Some(PositionSide::Long),
        Signal::EnterShort => Some(PositionSide::Short),
        Signal::NoSignal => None,
    }
}

pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Build an engine, rejecting inconsistent configuration up front.
    pub fn new(config: BacktestConfig) -> Result<Self, BacktestError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Bars needed for at least one tradable decision: the indicator
    /// warm-up, the generator's own first (warm-up) snapshot, one decision
    /// bar and one bar to fill on.
    pub fn required_bars(&self) -> usize {
        self.config.strategy.warmup_bars() + 2
    }

    pub fn run(&self, candles: &[Candle]) -> Result<BacktestResult, BacktestError> {
        let required = self.required_bars();
        if candles.len() < required {
            return Err(BacktestError::InsufficientData {
                required,
                available: candles.len(),
            });
        }

        let strategy = &self.config.strategy;
        let mut pipeline = IndicatorPipeline::from_config(strategy);
        let mut generator = CrossoverSignalGenerator::new(strategy.thresholds);
        let mut account = Account::new(
            strategy.instrument_id.clone(),
            self.config.starting_balance,
            self.config.fee_rate,
        );

        info!(
            instrument = %strategy.instrument_id,
            fast = strategy.fast_ma_period,
            slow = strategy.slow_ma_period,
            rsi = strategy.rsi_period,
            bars = candles.len(),
            "Starting backtest"
        );

        let mut pending: Option<PositionSide> = None;
        let mut equity_curve = Vec::new();
        let mut bars_evaluated = 0;
        let mut long_signals = 0;
        let mut short_signals = 0;

        for (index, candle) in candles.iter().enumerate() {
            if let Some(target) = pending.take() {
                account.enter(target, strategy.trade_size, candle.open, candle.timestamp);
            }

            let Some(snapshot) = pipeline.update(candle) else {
                continue;
            };

            let signal = generator.on_bar(&snapshot)?;
            bars_evaluated += 1;
            match signal {
                Signal::EnterLong => long_signals += 1,
                Signal::EnterShort => short_signals += 1,
                Signal::NoSignal => {}
            }

            if let Some(target) = target_side(signal) {
                if index + 1 < candles.len() {
                    pending = Some(target);
                } else {
                    debug!(?signal, "signal on final bar has no next open, dropped");
                }
            }

            equity_curve.push(EquityPoint {
                timestamp: candle.timestamp,
                equity: account.balance,
            });
        }

        if let Some(last) = candles.last() {
            if account.position.is_some() {
                info!("End of data - flattening open position");
                account.close(last.close, last.timestamp);
                // The flattening trade belongs to the last bar's point.
                if equity_curve.last().map(|p: &EquityPoint| p.timestamp) == Some(last.timestamp) {
                    equity_curve.pop();
                }
                equity_curve.push(EquityPoint {
                    timestamp: last.timestamp,
                    equity: account.balance,
                });
            }
        }

        info!(
            fills = account.fills.len(),
            positions = account.positions.len(),
            ending_balance = account.balance,
            "Backtest finished"
        );

        Ok(BacktestResult {
            instrument: account.instrument,
            starting_balance: self.config.starting_balance,
            ending_balance: account.balance,
            bars_loaded: candles.len(),
            bars_evaluated,
            long_signals,
            short_signals,
            fills: account.fills,
            positions: account.positions,
            equity_curve,
        })
    }
}
