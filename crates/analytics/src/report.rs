use core_types::{Session, TradingDay};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gross profit over gross loss.
///
/// A profit factor has no finite value when there were profits but no losses.
/// That case is kept as its own variant so the presentation layer decides how to
/// show it, instead of a magic number leaking into the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ProfitFactor {
    Finite(Decimal),
    /// Gross loss is zero while gross profit is positive.
    Unbounded,
}

impl ProfitFactor {
    pub fn from_gross(gross_profit: Decimal, gross_loss: Decimal) -> Self {
        if gross_loss > Decimal::ZERO {
            // A quotient past the decimal range counts as unbounded.
            gross_profit
                .checked_div(gross_loss)
                .map_or(ProfitFactor::Unbounded, ProfitFactor::Finite)
        } else if gross_profit > Decimal::ZERO {
            ProfitFactor::Unbounded
        } else {
            ProfitFactor::Finite(Decimal::ZERO)
        }
    }

    /// The value to render, with `cap` standing in for an unbounded factor.
    pub fn display_value(&self, cap: Decimal) -> Decimal {
        match self {
            ProfitFactor::Finite(value) => *value,
            ProfitFactor::Unbounded => cap,
        }
    }

    /// How far along a progress bar towards `target` this factor is, clamped to 0-100%.
    pub fn progress_towards(&self, target: Decimal) -> Decimal {
        match self {
            ProfitFactor::Unbounded => Decimal::ONE_HUNDRED,
            ProfitFactor::Finite(_) if target <= Decimal::ZERO => Decimal::ONE_HUNDRED,
            ProfitFactor::Finite(value) => value
                .checked_div(target)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map_or_else(
                    || saturated_pct(*value),
                    |pct| pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
                ),
        }
    }
}

/// The clamped percentage of a ratio too large to represent, which only its sign decides.
pub(crate) fn saturated_pct(numerator: Decimal) -> Decimal {
    if numerator > Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Finite(value) => write!(f, "{:.2}", value),
            ProfitFactor::Unbounded => f.write_str("∞"),
        }
    }
}

/// A session together with its signed P&L.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub session: Session,
    pub pnl: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    pub day: TradingDay,
    pub pnl: Decimal,
}

/// One row of the instrument win-rate ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedInstrument {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub symbol: String,
    pub trades: u32,
    pub win_rate: Decimal,
    pub pnl: Decimal,
    /// Set on the first-ranked instrument only, even when others tie with it.
    pub top_performer: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentSummary {
    pub total_trades: u32,
    pub total_pnl: Decimal,
    /// The symbol with the highest P&L; the earliest listed one on ties.
    pub most_profitable: Option<String>,
}

/// The progress and risk cards at the top of the account dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProgress {
    pub profit_target_progress_pct: Decimal,
    pub drawdown_used_pct: Decimal,
    pub drawdown_remaining: Decimal,
    /// Loss taken on the most recent day, as a non-negative magnitude.
    pub daily_loss_used: Decimal,
    pub daily_loss_remaining: Decimal,
    pub trading_days: usize,
}

/// The full set of metrics derived from one `AccountRecord`.
///
/// Every field is a function of the record it was computed from. The struct holds
/// no reference back to that record and is never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    // I. Edge Ratios
    pub profit_factor: ProfitFactor,
    pub profit_factor_progress_pct: Decimal,
    pub risk_reward: Decimal,
    pub expectancy: Decimal,

    // II. Breakdown Rankings
    pub best_session: SessionResult,
    pub worst_session: SessionResult,
    pub best_day: DayResult,
    pub worst_day: DayResult,
    pub instrument_ranking: Vec<RankedInstrument>,
    pub instrument_summary: InstrumentSummary,

    // III. Account Progress
    pub progress: AccountProgress,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn profit_factor_divides_gross_profit_by_gross_loss() {
        assert_eq!(
            ProfitFactor::from_gross(dec!(3000), dec!(1500)),
            ProfitFactor::Finite(dec!(2))
        );
    }

    #[test]
    fn profit_factor_without_losses_is_unbounded() {
        assert_eq!(
            ProfitFactor::from_gross(dec!(0.01), Decimal::ZERO),
            ProfitFactor::Unbounded
        );
        assert_eq!(
            ProfitFactor::from_gross(dec!(125000), Decimal::ZERO),
            ProfitFactor::Unbounded
        );
    }

    #[test]
    fn profit_factor_without_any_trades_is_zero() {
        assert_eq!(
            ProfitFactor::from_gross(Decimal::ZERO, Decimal::ZERO),
            ProfitFactor::Finite(Decimal::ZERO)
        );
    }

    #[test]
    fn progress_is_normalised_against_target() {
        let target = dec!(1.5);
        assert_eq!(ProfitFactor::Finite(dec!(0.75)).progress_towards(target), dec!(50));
        assert_eq!(ProfitFactor::Finite(dec!(3)).progress_towards(target), dec!(100));
        assert_eq!(ProfitFactor::Unbounded.progress_towards(target), dec!(100));
        assert_eq!(ProfitFactor::Finite(Decimal::ZERO).progress_towards(target), dec!(0));
    }

    #[test]
    fn profit_factor_beyond_decimal_range_is_unbounded() {
        assert_eq!(
            ProfitFactor::from_gross(dec!(1000000000), dec!(0.00000000000000000001)),
            ProfitFactor::Unbounded
        );
    }

    #[test]
    fn progress_of_a_huge_factor_saturates() {
        let huge = ProfitFactor::from_gross(dec!(1e28), dec!(1));
        assert_eq!(huge, ProfitFactor::Finite(dec!(1e28)));
        assert_eq!(huge.progress_towards(dec!(1.5)), dec!(100));
        assert_eq!(
            ProfitFactor::Finite(dec!(1)).progress_towards(dec!(0.0000000000000000000000000001)),
            dec!(100)
        );
    }

    #[test]
    fn unbounded_profit_factor_renders_with_cap() {
        assert_eq!(ProfitFactor::Unbounded.display_value(dec!(999)), dec!(999));
        assert_eq!(ProfitFactor::Finite(dec!(1.2)).display_value(dec!(999)), dec!(1.2));
        assert_eq!(ProfitFactor::Unbounded.to_string(), "∞");
        assert_eq!(ProfitFactor::Finite(dec!(1.2345)).to_string(), "1.23");
    }
}
