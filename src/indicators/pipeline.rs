//! Per-bar indicator pipeline feeding the crossover generator.

use crate::config::StrategyConfig;
use crate::indicators::momentum::RelativeStrengthIndex;
use crate::indicators::trend::SimpleMovingAverage;
use crate::models::indicators::{BarSnapshot, Candle};

/// Updates the fast/slow SMAs and the RSI from each closed candle and
/// yields a snapshot once all three are warmed up.
#[derive(Debug, Clone)]
pub struct IndicatorPipeline {
    fast: SimpleMovingAverage,
    slow: SimpleMovingAverage,
    rsi: RelativeStrengthIndex,
}

impl IndicatorPipeline {
    pub fn new(fast_period: usize, slow_period: usize, rsi_period: usize) -> Self {
        Self {
            fast: SimpleMovingAverage::new(fast_period),
            slow: SimpleMovingAverage::new(slow_period),
            rsi: RelativeStrengthIndex::new(rsi_period),
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(
            config.fast_ma_period,
            config.slow_ma_period,
            config.rsi_period,
        )
    }

    pub fn initialized(&self) -> bool {
        self.fast.initialized() && self.slow.initialized() && self.rsi.initialized()
    }

    /// Feed one candle. Returns `None` during warm-up.
    pub fn update(&mut self, candle: &Candle) -> Option<BarSnapshot> {
        self.fast.update(candle.close);
        self.slow.update(candle.close);
        self.rsi.update(candle.close);

        Some(BarSnapshot::new(
            candle.timestamp,
            self.fast.value()?,
            self.slow.value()?,
            self.rsi.value()?,
        ))
    }

    pub fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.rsi.reset();
    }
}
