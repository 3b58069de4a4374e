//! Moving-average crossover detection gated by an RSI filter.
//!
//! The generator only ever compares the current bar against the bar
//! immediately before it, so the decision for bar `t` never depends on
//! anything after `t`.

use crate::config::RsiThresholds;
use crate::error::SignalError;
use crate::models::indicators::BarSnapshot;
use crate::models::signal::Signal;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Fast/slow moving-average pair from the last accepted bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaPair {
    pub fast: f64,
    pub slow: f64,
}

/// State carried between bars. Empty until the first bar is accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalState {
    previous: Option<MaPair>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl SignalState {
    pub fn previous(&self) -> Option<MaPair> {
        self.previous
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_timestamp
    }

    pub fn is_warmed_up(&self) -> bool {
        self.previous.is_some()
    }
}

/// Maps a stream of [`BarSnapshot`]s to one [`Signal`] per bar.
///
/// One instance per bar stream; not meant to be shared between callers.
#[derive(Debug, Clone)]
pub struct CrossoverSignalGenerator {
    thresholds: RsiThresholds,
    state: SignalState,
}

impl Default for CrossoverSignalGenerator {
    fn default() -> Self {
        Self::new(RsiThresholds::default())
    }
}

impl CrossoverSignalGenerator {
    pub fn new(thresholds: RsiThresholds) -> Self {
        Self {
            thresholds,
            state: SignalState::default(),
        }
    }

    pub fn thresholds(&self) -> RsiThresholds {
        self.thresholds
    }

    pub fn state(&self) -> &SignalState {
        &self.state
    }

    /// Evaluate one bar.
    ///
    /// Rejects out-of-order bars and non-finite indicator values without
    /// touching the state. Otherwise the previous pair is replaced by the
    /// current one after the decision, whichever branch fired.
    pub fn on_bar(&mut self, bar: &BarSnapshot) -> Result<Signal, SignalError> {
        self.check_preconditions(bar)?;

        let current = MaPair {
            fast: bar.fast_ma,
            slow: bar.slow_ma,
        };

        let signal = match self.state.previous {
            None => {
                debug!(timestamp = %bar.timestamp, "crossover warm-up bar");
                Signal::NoSignal
            }
            Some(previous) => self.decide(previous, current, bar.rsi),
        };

        self.state.previous = Some(current);
        self.state.last_timestamp = Some(bar.timestamp);

        match signal {
            Signal::EnterLong => info!(
                timestamp = %bar.timestamp,
                fast_ma = bar.fast_ma,
                slow_ma = bar.slow_ma,
                rsi = bar.rsi,
                "BUY signal - fast MA crossed above slow MA, RSI: {:.2}",
                bar.rsi
            ),
            Signal::EnterShort => info!(
                timestamp = %bar.timestamp,
                fast_ma = bar.fast_ma,
                slow_ma = bar.slow_ma,
                rsi = bar.rsi,
                "SELL signal - fast MA crossed below slow MA, RSI: {:.2}",
                bar.rsi
            ),
            Signal::NoSignal => {}
        }

        Ok(signal)
    }

    /// Forget the previous bar, as at the start of a new run.
    pub fn reset(&mut self) {
        self.state = SignalState::default();
    }

    fn decide(&self, previous: MaPair, current: MaPair, rsi: f64) -> Signal {
        let crossed_up = previous.fast <= previous.slow && current.fast > current.slow;
        let crossed_down = previous.fast >= previous.slow && current.fast < current.slow;

        if crossed_up && rsi < self.thresholds.overbought {
            Signal::EnterLong
        } else if crossed_down && rsi > self.thresholds.oversold {
            Signal::EnterShort
        } else {
            if crossed_up || crossed_down {
                debug!(rsi, "crossover blocked by RSI filter");
            }
            Signal::NoSignal
        }
    }

    fn check_preconditions(&self, bar: &BarSnapshot) -> Result<(), SignalError> {
        if let Some(previous) = self.state.last_timestamp {
            if bar.timestamp <= previous {
                return Err(SignalError::NonMonotonic {
                    previous,
                    timestamp: bar.timestamp,
                });
            }
        }

        for (name, value) in [
            ("fast_ma", bar.fast_ma),
            ("slow_ma", bar.slow_ma),
            ("rsi", bar.rsi),
        ] {
            if !value.is_finite() {
                return Err(SignalError::UndefinedIndicator {
                    name,
                    value,
                    timestamp: bar.timestamp,
                });
            }
        }

        Ok(())
    }
}
