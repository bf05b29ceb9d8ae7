use crate::enums::{Plan, Session, Stage, Status, TradingDay};
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-instrument trading statistics for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentStats {
    /// The futures root symbol (e.g., "ES", "NQ").
    pub symbol: String,
    pub trades: u32,
    /// Percentage of winning trades, 0-100.
    pub win_rate: Decimal,
    pub pnl: Decimal,
}

/// A snapshot of one trading account as supplied by the account data source.
///
/// The record is read-only to every consumer. Metrics derived from it are
/// recomputed from the current snapshot on each request and never stored back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    // I. Identity
    pub id: String,
    pub name: String,
    pub plan: Plan,
    pub stage: Stage,
    pub status: Status,

    // II. Risk Parameters
    pub starting_balance: Decimal,
    pub profit_target: Decimal,
    pub max_drawdown: Decimal,
    pub daily_loss_limit: Decimal,

    // III. Running State
    pub current_balance: Decimal,
    pub closed_pnl: Decimal,
    pub drawdown_used: Decimal,

    // IV. Aggregate Trade Metrics
    pub total_trades: u32,
    pub win_rate: Decimal,
    pub avg_win: Decimal,
    pub avg_loss: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,

    // V. Time Series
    /// End-of-day balances, oldest first. One entry per calendar day ending at `history_end`.
    pub equity_history: Vec<Decimal>,
    /// `daily_pnl[0]` is zero; every later entry is the change from the previous balance.
    pub daily_pnl: Vec<Decimal>,
    pub history_end: NaiveDate,

    // VI. Breakdowns
    pub session_performance: BTreeMap<Session, Decimal>,
    pub day_of_week_performance: BTreeMap<TradingDay, Decimal>,
    #[serde(default)]
    pub instruments: Vec<InstrumentStats>,
}

impl AccountRecord {
    /// Derives the daily P&L series from an equity history.
    pub fn daily_pnl_from_equity(equity_history: &[Decimal]) -> Vec<Decimal> {
        if equity_history.is_empty() {
            return Vec::new();
        }

        std::iter::once(Decimal::ZERO)
            .chain(equity_history.windows(2).map(|w| w[1] - w[0]))
            .collect()
    }

    /// How far the lowest of the `recent` balances sits below the starting balance.
    pub fn drawdown_used_from(starting_balance: Decimal, recent: &[Decimal]) -> Decimal {
        recent
            .iter()
            .copied()
            .min()
            .map(|low| (starting_balance - low).max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
    }

    /// The balance at which the account fails its max-drawdown rule.
    pub fn max_loss_level(&self) -> Decimal {
        self.starting_balance - self.max_drawdown
    }

    /// The balance at which the account passes its profit target.
    pub fn profit_target_level(&self) -> Decimal {
        self.starting_balance + self.profit_target
    }

    /// Signed P&L for a session. Sessions missing from the breakdown count as flat.
    pub fn session_pnl(&self, session: Session) -> Decimal {
        self.session_performance
            .get(&session)
            .copied()
            .unwrap_or_default()
    }

    pub fn day_pnl(&self, day: TradingDay) -> Decimal {
        self.day_of_week_performance
            .get(&day)
            .copied()
            .unwrap_or_default()
    }

    /// Checks every record invariant and reports the first one that does not hold.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.equity_history.is_empty() {
            return Err(CoreError::EmptyHistory);
        }
        if self.equity_history.len() != self.daily_pnl.len() {
            return Err(CoreError::SeriesLengthMismatch {
                equity: self.equity_history.len(),
                daily: self.daily_pnl.len(),
            });
        }

        let expected = Self::daily_pnl_from_equity(&self.equity_history);
        if let Some((index, (&expected, &actual))) = expected
            .iter()
            .zip(self.daily_pnl.iter())
            .enumerate()
            .find(|(_, (e, a))| e != a)
        {
            return Err(CoreError::DailyPnlMismatch {
                index,
                expected,
                actual,
            });
        }

        if self.win_rate < Decimal::ZERO || self.win_rate > Decimal::ONE_HUNDRED {
            return Err(CoreError::WinRateOutOfRange(self.win_rate));
        }

        let magnitudes = [
            ("startingBalance", self.starting_balance),
            ("profitTarget", self.profit_target),
            ("maxDrawdown", self.max_drawdown),
            ("dailyLossLimit", self.daily_loss_limit),
            ("avgWin", self.avg_win),
            ("avgLoss", self.avg_loss),
            ("grossProfit", self.gross_profit),
            ("grossLoss", self.gross_loss),
        ];
        if let Some(&(field, value)) = magnitudes.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(CoreError::NegativeMagnitude { field, value });
        }

        if self.drawdown_used < Decimal::ZERO || self.drawdown_used > self.starting_balance {
            return Err(CoreError::DrawdownOutOfRange {
                drawdown_used: self.drawdown_used,
                starting_balance: self.starting_balance,
            });
        }

        if let Some(instrument) = self
            .instruments
            .iter()
            .find(|i| i.win_rate < Decimal::ZERO || i.win_rate > Decimal::ONE_HUNDRED)
        {
            return Err(CoreError::InstrumentWinRateOutOfRange {
                symbol: instrument.symbol.clone(),
                win_rate: instrument.win_rate,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    pub(crate) fn sample_record() -> AccountRecord {
        let equity_history = vec![dec!(50000), dec!(50250), dec!(49900), dec!(50400)];
        let daily_pnl = AccountRecord::daily_pnl_from_equity(&equity_history);
        AccountRecord {
            id: "ACC-1001".to_string(),
            name: "Standard 50K".to_string(),
            plan: Plan::Standard,
            stage: Stage::Evaluation,
            status: Status::Active,
            starting_balance: dec!(50000),
            profit_target: dec!(3000),
            max_drawdown: dec!(2000),
            daily_loss_limit: dec!(1000),
            current_balance: dec!(50400),
            closed_pnl: dec!(400),
            drawdown_used: AccountRecord::drawdown_used_from(dec!(50000), &equity_history),
            total_trades: 12,
            win_rate: dec!(58.33),
            avg_win: dec!(210),
            avg_loss: dec!(180),
            gross_profit: dec!(1470),
            gross_loss: dec!(900),
            equity_history,
            daily_pnl,
            history_end: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            session_performance: BTreeMap::from([
                (Session::PreMarket, dec!(100)),
                (Session::Morning, dec!(500)),
                (Session::Lunch, dec!(-50)),
                (Session::Afternoon, dec!(200)),
            ]),
            day_of_week_performance: BTreeMap::from([
                (TradingDay::Monday, dec!(250)),
                (TradingDay::Tuesday, dec!(-350)),
                (TradingDay::Wednesday, dec!(500)),
            ]),
            instruments: vec![InstrumentStats {
                symbol: "ES".to_string(),
                trades: 12,
                win_rate: dec!(58.33),
                pnl: dec!(400),
            }],
        }
    }

    #[test]
    fn daily_pnl_round_trips_equity_history() {
        let equity = vec![dec!(100), dec!(110), dec!(95), dec!(95)];
        let daily = AccountRecord::daily_pnl_from_equity(&equity);

        assert_eq!(daily.len(), equity.len());
        assert_eq!(daily[0], Decimal::ZERO);
        for i in 1..equity.len() {
            assert_eq!(equity[i] - equity[i - 1], daily[i]);
        }
    }

    #[test]
    fn daily_pnl_of_empty_history_is_empty() {
        assert!(AccountRecord::daily_pnl_from_equity(&[]).is_empty());
    }

    #[test]
    fn drawdown_used_is_clamped_at_zero() {
        assert_eq!(
            AccountRecord::drawdown_used_from(dec!(100), &[dec!(120), dec!(101)]),
            Decimal::ZERO
        );
        assert_eq!(
            AccountRecord::drawdown_used_from(dec!(100), &[dec!(120), dec!(85)]),
            dec!(15)
        );
        assert_eq!(AccountRecord::drawdown_used_from(dec!(100), &[]), Decimal::ZERO);
    }

    #[test]
    fn sample_record_is_valid() {
        assert_eq!(sample_record().validate(), Ok(()));
    }

    #[test]
    fn missing_breakdown_keys_read_as_flat() {
        let record = sample_record();
        assert_eq!(record.day_pnl(TradingDay::Friday), Decimal::ZERO);
        assert_eq!(record.session_pnl(Session::Morning), dec!(500));
    }

    #[test]
    fn validate_rejects_broken_invariants() {
        let mut record = sample_record();
        record.daily_pnl.pop();
        assert_eq!(
            record.validate(),
            Err(CoreError::SeriesLengthMismatch { equity: 4, daily: 3 })
        );

        let mut record = sample_record();
        record.daily_pnl[2] = dec!(1);
        assert!(matches!(
            record.validate(),
            Err(CoreError::DailyPnlMismatch { index: 2, .. })
        ));

        let mut record = sample_record();
        record.win_rate = dec!(101);
        assert_eq!(record.validate(), Err(CoreError::WinRateOutOfRange(dec!(101))));

        let mut record = sample_record();
        record.gross_loss = dec!(-5);
        assert_eq!(
            record.validate(),
            Err(CoreError::NegativeMagnitude {
                field: "grossLoss",
                value: dec!(-5)
            })
        );

        let mut record = sample_record();
        record.drawdown_used = dec!(50000.01);
        assert_eq!(
            record.validate(),
            Err(CoreError::DrawdownOutOfRange {
                drawdown_used: dec!(50000.01),
                starting_balance: dec!(50000),
            })
        );

        let mut record = sample_record();
        record.drawdown_used = dec!(-1);
        assert!(matches!(
            record.validate(),
            Err(CoreError::DrawdownOutOfRange { .. })
        ));

        let mut record = sample_record();
        record.instruments[0].win_rate = dec!(100.5);
        assert_eq!(
            record.validate(),
            Err(CoreError::InstrumentWinRateOutOfRange {
                symbol: record.instruments[0].symbol.clone(),
                win_rate: dec!(100.5),
            })
        );

        let mut record = sample_record();
        record.equity_history.clear();
        record.daily_pnl.clear();
        assert_eq!(record.validate(), Err(CoreError::EmptyHistory));
    }

    #[test]
    fn record_uses_camel_case_wire_names() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert!(json.get("startingBalance").is_some());
        assert!(json["sessionPerformance"].get("preMarket").is_some());

        let back: AccountRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample_record());
    }
}
