//! MA Crossover + RSI backtest runner
//!
//! Loads OHLCV bars from CSV, replays them through the strategy and writes
//! fills, closed positions, the equity curve and a summary next to them.

use dotenvy::dotenv;
use ma_cross_rsi::backtest::{export_all, BacktestEngine, BacktestSummary};
use ma_cross_rsi::config::{get_environment, BacktestConfig};
use ma_cross_rsi::data::load_candles;
use ma_cross_rsi::error::BacktestError;
use ma_cross_rsi::logging;
use tracing::{error, info};

fn run(config: BacktestConfig) -> Result<(), BacktestError> {
    let candles = load_candles(&config.data_path)?;

    let engine = BacktestEngine::new(config)?;
    let result = engine.run(&candles)?;
    let summary = BacktestSummary::from_result(&result);

    let files = export_all(&result, &summary, &engine.config().output_dir)?;
    info!(
        fills = %files.fills.display(),
        positions = %files.positions.display(),
        equity = %files.equity_curve.display(),
        summary = %files.summary.display(),
        "Outputs written"
    );

    println!("{}", summary);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let env = get_environment();
    info!("Starting MA Crossover + RSI backtest");
    info!(environment = %env, "Environment");

    let config = BacktestConfig::from_env();
    info!(
        data = %config.data_path.display(),
        output = %config.output_dir.display(),
        fast = config.strategy.fast_ma_period,
        slow = config.strategy.slow_ma_period,
        rsi = config.strategy.rsi_period,
        "Configuration loaded"
    );

    if let Err(e) = run(config) {
        error!(category = e.category(), error = %e, "Backtest failed");
        return Err(e.into());
    }

    info!("Backtest completed successfully");
    Ok(())
}
