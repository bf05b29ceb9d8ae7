use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("Unsupported timeframe '{0}', expected one of 1, 7, 30, 90")]
    UnsupportedTimeframe(String),
}
