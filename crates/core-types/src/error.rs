use rust_decimal::Decimal;
use thiserror::Error;

/// Violations of the `AccountRecord` invariants, reported by `AccountRecord::validate`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Equity history must contain at least one entry")]
    EmptyHistory,

    #[error("Equity history has {equity} entries but daily P&L has {daily}")]
    SeriesLengthMismatch { equity: usize, daily: usize },

    #[error("Daily P&L at index {index} is {actual}, expected {expected}")]
    DailyPnlMismatch {
        index: usize,
        expected: Decimal,
        actual: Decimal,
    },

    #[error("Win rate {0} is outside of [0, 100]")]
    WinRateOutOfRange(Decimal),

    #[error("Field '{field}' must be non-negative, got {value}")]
    NegativeMagnitude { field: &'static str, value: Decimal },

    #[error("Drawdown used {drawdown_used} is outside of [0, {starting_balance}]")]
    DrawdownOutOfRange {
        drawdown_used: Decimal,
        starting_balance: Decimal,
    },

    #[error("Instrument {symbol} has win rate {win_rate}, outside of [0, 100]")]
    InstrumentWinRateOutOfRange { symbol: String, win_rate: Decimal },
}
