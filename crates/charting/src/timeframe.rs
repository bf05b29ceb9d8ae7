use crate::error::ChartError;
use std::fmt;
use std::str::FromStr;

/// The chart range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    /// Today, as synthetic hourly points.
    Intraday,
    /// The trailing 7 daily entries.
    Week,
    /// The trailing 30 daily entries.
    Month,
    /// The trailing 90 daily entries.
    Quarter,
}

impl Timeframe {
    /// Every timeframe the dashboard offers, in selector order.
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Intraday,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Quarter,
    ];

    /// How many daily entries the range covers, or `None` for the intraday view.
    pub fn trailing_days(&self) -> Option<usize> {
        match self {
            Timeframe::Intraday => None,
            Timeframe::Week => Some(7),
            Timeframe::Month => Some(30),
            Timeframe::Quarter => Some(90),
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Month
    }
}

impl FromStr for Timeframe {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Timeframe::Intraday),
            "7" => Ok(Timeframe::Week),
            "30" => Ok(Timeframe::Month),
            "90" => Ok(Timeframe::Quarter),
            other => Err(ChartError::UnsupportedTimeframe(other.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    /// Writes the selector string, so `Display` and `FromStr` round-trip.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.trailing_days() {
            None => f.write_str("1"),
            Some(days) => write!(f, "{}", days),
        }
    }
}
