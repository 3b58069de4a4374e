//! Summary statistics over a finished run.

use crate::backtest::engine::BacktestResult;
use crate::models::trade::EquityPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub instrument: String,
    pub starting_balance: f64,
    pub ending_balance: f64,
    pub total_pnl: f64,
    pub return_pct: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate_pct: Option<f64>,
    pub total_trade_pnl: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_win: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_loss: Option<f64>,
    /// Largest peak-to-trough decline of realized equity, as a positive percentage.
    pub max_drawdown_pct: f64,
    pub total_fills: usize,
    pub total_commission: f64,
}

impl BacktestSummary {
    pub fn from_result(result: &BacktestResult) -> Self {
        let pnls: Vec<f64> = result.positions.iter().map(|p| p.pnl).collect();
        let total_trades = pnls.len();
        let winning_trades = pnls.iter().filter(|p| **p > 0.0).count();
        let losing_trades = pnls.iter().filter(|p| **p < 0.0).count();

        let win_rate_pct = (total_trades > 0)
            .then(|| winning_trades as f64 / total_trades as f64 * 100.0);
        let largest_win = pnls.iter().copied().reduce(f64::max);
        let largest_loss = pnls.iter().copied().reduce(f64::min);

        let total_pnl = result.ending_balance - result.starting_balance;

        Self {
            instrument: result.instrument.clone(),
            starting_balance: result.starting_balance,
            ending_balance: result.ending_balance,
            total_pnl,
            return_pct: total_pnl / result.starting_balance * 100.0,
            total_trades,
            winning_trades,
            losing_trades,
            win_rate_pct,
            total_trade_pnl: pnls.iter().sum(),
            largest_win,
            largest_loss,
            max_drawdown_pct: max_drawdown_pct(result.starting_balance, &result.equity_curve),
            total_fills: result.fills.len(),
            total_commission: result.fills.iter().map(|f| f.commission).sum(),
        }
    }
}

/// Max drawdown of the curve, seeded with the starting balance as the first peak.
pub fn max_drawdown_pct(starting_balance: f64, curve: &[EquityPoint]) -> f64 {
    let mut peak = starting_balance;
    let mut worst = 0.0_f64;
    for point in curve {
        peak = peak.max(point.equity);
        if peak > 0.0 {
            worst = worst.max((peak - point.equity) / peak);
        }
    }
    worst * 100.0
}

fn money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

impl fmt::Display for BacktestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "BACKTEST RESULTS - {}", self.instrument)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Starting Balance: {}", money(self.starting_balance))?;
        writeln!(f, "Ending Balance:   {}", money(self.ending_balance))?;
        writeln!(f, "Total PnL:        {}", money(self.total_pnl))?;
        writeln!(f, "Return:           {:.2}%", self.return_pct)?;
        writeln!(f)?;
        writeln!(f, "Total Trades:     {}", self.total_trades)?;
        writeln!(f, "Winning Trades:   {}", self.winning_trades)?;
        writeln!(f, "Losing Trades:    {}", self.losing_trades)?;
        if let Some(win_rate) = self.win_rate_pct {
            writeln!(f, "Win Rate:         {:.1}%", win_rate)?;
        }
        writeln!(f, "Total Trade PnL:  {}", money(self.total_trade_pnl))?;
        if let Some(loss) = self.largest_loss {
            writeln!(f, "Largest Loss:     {}", money(loss))?;
        }
        if let Some(win) = self.largest_win {
            writeln!(f, "Largest Win:      {}", money(win))?;
        }
        writeln!(f, "Commission Paid:  {}", money(self.total_commission))?;
        writeln!(f)?;
        writeln!(f, "Max Drawdown:     {:.2}%", self.max_drawdown_pct)?;
        write!(f, "{}", rule)
    }
}
