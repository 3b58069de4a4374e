//! SMA (Simple Moving Average) indicator

use crate::models::indicators::Candle;
use std::collections::VecDeque;

/// Rolling arithmetic mean of the last `period` closes.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: VecDeque::with_capacity(period),
            sum: 0.0,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn update(&mut self, close: f64) {
        if self.period == 0 {
            return;
        }
        self.window.push_back(close);
        self.sum += close;
        if self.window.len() > self.period {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
            }
        }
    }

    pub fn initialized(&self) -> bool {
        self.period > 0 && self.window.len() == self.period
    }

    pub fn value(&self) -> Option<f64> {
        if !self.initialized() {
            return None;
        }
        Some(self.sum / self.period as f64)
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
    }
}

/// SMA of the closes in `candles` over the trailing `period` bars.
pub fn calculate_sma(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }
    let sum: f64 = candles.iter().rev().take(period).map(|c| c.close).sum();
    Some(sum / period as f64)
}
