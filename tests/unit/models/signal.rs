//! Unit tests for signal and trade models

use ma_cross_rsi::models::{OrderSide, PositionSide, Signal};

#[test]
fn test_signal_default_and_entry() {
    assert_eq!(Signal::default(), Signal::NoSignal);
    assert!(!Signal::NoSignal.is_entry());
    assert!(Signal::EnterLong.is_entry());
    assert!(Signal::EnterShort.is_entry());
}

#[test]
fn test_signal_serialization() {
    assert_eq!(serde_json::to_string(&Signal::EnterLong).unwrap(), "\"enter_long\"");
    assert_eq!(serde_json::to_string(&Signal::NoSignal).unwrap(), "\"no_signal\"");
}

#[test]
fn test_position_side_fills() {
    assert_eq!(PositionSide::Long.entry_side(), OrderSide::Buy);
    assert_eq!(PositionSide::Long.exit_side(), OrderSide::Sell);
    assert_eq!(PositionSide::Short.entry_side(), OrderSide::Sell);
    assert_eq!(PositionSide::Short.exit_side(), OrderSide::Buy);
    assert_eq!(OrderSide::Buy.to_string(), "BUY");
    assert_eq!(serde_json::to_string(&PositionSide::Short).unwrap(), "\"SHORT\"");
}
