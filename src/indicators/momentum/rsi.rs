//! RSI (Relative Strength Index) indicator

use crate::models::indicators::Candle;
use std::collections::VecDeque;

/// RSI over simple rolling averages of gains and losses.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// A window with no gains reads 0 (flat closes included); a window with
/// gains and no losses reads 100.
///
/// Needs `period` close-to-close changes, i.e. `period + 1` closes.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    period: usize,
    last_close: Option<f64>,
    gains: VecDeque<f64>,
    losses: VecDeque<f64>,
}

impl RelativeStrengthIndex {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            last_close: None,
            gains: VecDeque::with_capacity(period),
            losses: VecDeque::with_capacity(period),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn update(&mut self, close: f64) {
        if let Some(previous) = self.last_close {
            let change = close - previous;
            self.gains.push_back(change.max(0.0));
            self.losses.push_back((-change).max(0.0));
            if self.gains.len() > self.period {
                self.gains.pop_front();
                self.losses.pop_front();
            }
        }
        self.last_close = Some(close);
    }

    pub fn initialized(&self) -> bool {
        self.period > 0 && self.gains.len() == self.period
    }

    pub fn value(&self) -> Option<f64> {
        if !self.initialized() {
            return None;
        }
        let avg_gain = self.gains.iter().sum::<f64>() / self.period as f64;
        let avg_loss = self.losses.iter().sum::<f64>() / self.period as f64;
        Some(rsi_from_averages(avg_gain, avg_loss))
    }

    pub fn reset(&mut self) {
        self.last_close = None;
        self.gains.clear();
        self.losses.clear();
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    // Flat window: no gain means RS = 0.
    if avg_gain == 0.0 {
        return 0.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// RSI of the trailing `period` changes in `candles`.
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let recent = &candles[candles.len() - (period + 1)..];
    let (gain_sum, loss_sum) = recent.windows(2).fold((0.0, 0.0), |(g, l), pair| {
        let change = pair[1].close - pair[0].close;
        (g + change.max(0.0), l + (-change).max(0.0))
    });

    Some(rsi_from_averages(
        gain_sum / period as f64,
        loss_sum / period as f64,
    ))
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_rsi(candles, 14)
}
