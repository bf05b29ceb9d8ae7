use crate::timeframe::Timeframe;
use chrono::Duration;
use configuration::ChartSettings;
use core_types::AccountRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::debug;

/// Hour of day of the first intraday point.
const FIRST_HOUR: u32 = 9;

/// One point of the account balance chart.
///
/// `max_loss` and `profit_target` are the same on every point of a series and
/// draw the two flat reference lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub label: String,
    pub balance: Decimal,
    pub max_loss: Decimal,
    pub profit_target: Decimal,
    pub pnl: Decimal,
}

/// Maps an account's equity history onto chart series.
#[derive(Debug, Clone)]
pub struct ChartProjector {
    seed: u64,
    intraday_hours: u32,
    intraday_jitter: Decimal,
}

impl Default for ChartProjector {
    fn default() -> Self {
        Self::new(&ChartSettings::default())
    }
}

impl ChartProjector {
    pub fn new(settings: &ChartSettings) -> Self {
        Self {
            seed: settings.seed,
            intraday_hours: settings.intraday_hours.max(1),
            intraday_jitter: settings.intraday_jitter.max(Decimal::ZERO),
        }
    }

    /// Projects `account` for `timeframe`.
    ///
    /// The intraday jitter is seeded from the configured seed and the account id,
    /// so repeated calls for the same account return the same series.
    pub fn project(&self, account: &AccountRecord, timeframe: Timeframe) -> Vec<ChartDataPoint> {
        let mut rng = StdRng::seed_from_u64(self.account_seed(&account.id));
        self.project_with_rng(account, timeframe, &mut rng)
    }

    /// Like [`ChartProjector::project`], drawing the intraday jitter from `rng`.
    pub fn project_with_rng<R: Rng>(
        &self,
        account: &AccountRecord,
        timeframe: Timeframe,
        rng: &mut R,
    ) -> Vec<ChartDataPoint> {
        let points = match timeframe.trailing_days() {
            Some(days) => project_days(account, days),
            None => self.project_intraday(account, rng),
        };

        debug!(
            account_id = %account.id,
            timeframe = %timeframe,
            points = points.len(),
            "projected chart series"
        );

        points
    }

    fn account_seed(&self, account_id: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        account_id.hash(&mut hasher);
        hasher.finish()
    }

    /// Spreads the most recent day's P&L linearly across the trading hours.
    ///
    /// This is a placeholder for a real intraday feed. Every point but the last
    /// gets uniform jitter within the configured bound; the last point is the
    /// recorded closing balance.
    fn project_intraday<R: Rng>(
        &self,
        account: &AccountRecord,
        rng: &mut R,
    ) -> Vec<ChartDataPoint> {
        let Some(&close) = account.equity_history.last() else {
            return Vec::new();
        };
        let day_pnl = account.daily_pnl.last().copied().unwrap_or_default();
        let prev_close = close - day_pnl;
        let step = day_pnl / Decimal::from(self.intraday_hours);
        let jitter_cents = (self.intraday_jitter * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .unwrap_or(0);

        let max_loss = account.max_loss_level();
        let profit_target = account.profit_target_level();
        let mut previous = prev_close;

        (0..self.intraday_hours)
            .map(|i| {
                let balance = if i + 1 == self.intraday_hours {
                    close
                } else {
                    let jitter = if jitter_cents > 0 {
                        Decimal::new(rng.random_range(-jitter_cents..=jitter_cents), 2)
                    } else {
                        Decimal::ZERO
                    };
                    (prev_close + step * Decimal::from(i + 1) + jitter).round_dp(2)
                };
                let pnl = balance - previous;
                previous = balance;

                ChartDataPoint {
                    label: format!("{:02}:00", (FIRST_HOUR + i) % 24),
                    balance,
                    max_loss,
                    profit_target,
                    pnl,
                }
            })
            .collect()
    }
}

/// The trailing `days` entries in chronological order. Shorter histories are returned whole.
pub fn project_days(account: &AccountRecord, days: usize) -> Vec<ChartDataPoint> {
    let len = account.equity_history.len();
    let start = len.saturating_sub(days);
    let max_loss = account.max_loss_level();
    let profit_target = account.profit_target_level();

    (start..len)
        .map(|i| {
            let date = account.history_end - Duration::days((len - 1 - i) as i64);
            ChartDataPoint {
                label: date.format("%b %d").to_string(),
                balance: account.equity_history[i],
                max_loss,
                profit_target,
                pnl: account.daily_pnl.get(i).copied().unwrap_or_default(),
            }
        })
        .collect()
}
