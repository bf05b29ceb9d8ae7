use crate::report::{
    AccountProgress, DayResult, DerivedMetrics, InstrumentSummary, ProfitFactor,
    RankedInstrument, SessionResult, saturated_pct,
};
use core_types::{AccountRecord, InstrumentStats, Session, TradingDay};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// The profit factor a dashboard progress bar treats as "full".
pub const DEFAULT_PROFIT_FACTOR_TARGET: Decimal = dec!(1.5);

/// A stateless calculator for deriving dashboard metrics from an account snapshot.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    profit_factor_target: Decimal,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self {
            profit_factor_target: DEFAULT_PROFIT_FACTOR_TARGET,
        }
    }

    pub fn with_profit_factor_target(mut self, target: Decimal) -> Self {
        self.profit_factor_target = target;
        self
    }

    /// The main entry point for calculating dashboard metrics.
    ///
    /// The calculation cannot fail: zero denominators and empty breakdowns
    /// degrade to zero values. Input validation belongs to the data source.
    ///
    /// # Arguments
    ///
    /// * `account` - The current snapshot of the account.
    pub fn calculate(&self, account: &AccountRecord) -> DerivedMetrics {
        let profit_factor = ProfitFactor::from_gross(account.gross_profit, account.gross_loss);
        let (best_session, worst_session) = rank_sessions(account);
        let (best_day, worst_day) = rank_days(account);
        let instrument_ranking = rank_instruments(&account.instruments);

        let metrics = DerivedMetrics {
            profit_factor,
            profit_factor_progress_pct: profit_factor.progress_towards(self.profit_factor_target),
            risk_reward: risk_reward(account.avg_win, account.avg_loss),
            expectancy: expectancy(account.win_rate, account.avg_win, account.avg_loss),
            best_session,
            worst_session,
            best_day,
            worst_day,
            instrument_summary: summarize_instruments(&account.instruments),
            instrument_ranking,
            progress: account_progress(account),
        };

        debug!(
            account_id = %account.id,
            profit_factor = %metrics.profit_factor,
            expectancy = %metrics.expectancy,
            best_session = %metrics.best_session.session,
            "derived metrics calculated"
        );

        metrics
    }
}

/// Average win over average loss. Without a loss sample no ratio is claimed.
pub fn risk_reward(avg_win: Decimal, avg_loss: Decimal) -> Decimal {
    if avg_loss > Decimal::ZERO {
        avg_win.checked_div(avg_loss).unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}

/// Expected P&L per trade. `win_rate` is a percentage.
pub fn expectancy(win_rate: Decimal, avg_win: Decimal, avg_loss: Decimal) -> Decimal {
    let p_win = win_rate / Decimal::ONE_HUNDRED;
    p_win
        .saturating_mul(avg_win)
        .saturating_sub((Decimal::ONE - p_win).saturating_mul(avg_loss))
}

/// Returns the (best, worst) session. Ties go to the session that comes first in `Session::ALL`.
pub fn rank_sessions(account: &AccountRecord) -> (SessionResult, SessionResult) {
    let results = Session::ALL.map(|session| SessionResult {
        session,
        pnl: account.session_pnl(session),
    });
    first_extremes(&results, |r| r.pnl)
}

/// Returns the (best, worst) weekday, with the same tie rule as [`rank_sessions`].
pub fn rank_days(account: &AccountRecord) -> (DayResult, DayResult) {
    let results = TradingDay::ALL.map(|day| DayResult {
        day,
        pnl: account.day_pnl(day),
    });
    first_extremes(&results, |r| r.pnl)
}

/// Ranks instruments by win rate, highest first.
///
/// The sort is stable, so instruments with equal win rates keep their input order.
pub fn rank_instruments(instruments: &[InstrumentStats]) -> Vec<RankedInstrument> {
    let mut sorted: Vec<&InstrumentStats> = instruments.iter().collect();
    sorted.sort_by(|a, b| b.win_rate.cmp(&a.win_rate));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, stats)| RankedInstrument {
            rank: i + 1,
            symbol: stats.symbol.clone(),
            trades: stats.trades,
            win_rate: stats.win_rate,
            pnl: stats.pnl,
            top_performer: i == 0,
        })
        .collect()
}

pub fn summarize_instruments(instruments: &[InstrumentStats]) -> InstrumentSummary {
    let most_profitable = instruments
        .iter()
        .fold(None::<&InstrumentStats>, |best, stats| match best {
            Some(b) if b.pnl >= stats.pnl => Some(b),
            _ => Some(stats),
        })
        .map(|stats| stats.symbol.clone());

    InstrumentSummary {
        total_trades: instruments.iter().map(|i| i.trades).sum(),
        total_pnl: instruments.iter().map(|i| i.pnl).sum(),
        most_profitable,
    }
}

pub fn account_progress(account: &AccountRecord) -> AccountProgress {
    let profit_target_progress_pct = percent_of(account.closed_pnl, account.profit_target);
    let drawdown_used_pct = percent_of(account.drawdown_used, account.max_drawdown);
    let drawdown_remaining = (account.max_drawdown - account.drawdown_used).max(Decimal::ZERO);

    let daily_loss_used = account
        .daily_pnl
        .last()
        .map(|pnl| (-*pnl).max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO);
    let daily_loss_remaining = (account.daily_loss_limit - daily_loss_used).max(Decimal::ZERO);

    AccountProgress {
        profit_target_progress_pct,
        drawdown_used_pct,
        drawdown_remaining,
        daily_loss_used,
        daily_loss_remaining,
        trading_days: account.equity_history.len(),
    }
}

/// `part` as a percentage of `whole`, clamped to 0-100. A zero `whole` yields 0.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or_else(
            || saturated_pct(part),
            |pct| pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
        )
}

/// First maximum and first minimum of a fixed, non-empty set of buckets.
fn first_extremes<T: Copy, const N: usize>(items: &[T; N], key: impl Fn(&T) -> Decimal) -> (T, T) {
    let mut best = items[0];
    let mut worst = items[0];
    for item in &items[1..] {
        // Strict comparisons keep the earlier bucket on ties.
        if key(item) > key(&best) {
            best = *item;
        }
        if key(item) < key(&worst) {
            worst = *item;
        }
    }
    (best, worst)
}
