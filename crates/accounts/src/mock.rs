use crate::error::SourceError;
use crate::{AccountSource, find_account};
use chrono::{Datelike, Duration, NaiveDate};
use configuration::GeneratorSettings;
use core_types::{
    AccountRecord, InstrumentStats, Plan, PlanRules, Session, Stage, Status, TradingDay,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tracing::info;

/// Futures roots the synthetic traders pick from.
pub const INSTRUMENTS: [&str; 6] = ["ES", "NQ", "CL", "GC", "YM", "RTY"];

/// Number of trailing history entries used for `drawdown_used`.
pub const RECENT_WINDOW: usize = 30;

const MAX_TRADES_PER_DAY: u32 = 5;
const FIRST_ACCOUNT_NUMBER: usize = 1001;

/// An `AccountSource` backed by synthetic accounts.
///
/// Generation is a pure function of the settings and the history end date:
/// the same seed always produces the same accounts.
#[derive(Debug, Clone)]
pub struct MockAccountSource {
    accounts: Vec<AccountRecord>,
}

impl MockAccountSource {
    /// Generates `settings.accounts` accounts whose histories end on `history_end`.
    pub fn generate(settings: &GeneratorSettings, history_end: NaiveDate) -> Self {
        let accounts: Vec<AccountRecord> = (0..settings.accounts)
            .map(|index| {
                let mut rng = StdRng::seed_from_u64(settings.seed.wrapping_add(index as u64));
                generate_account(index, settings.history_days.max(1), history_end, &mut rng)
            })
            .collect();

        info!(
            seed = settings.seed,
            accounts = accounts.len(),
            history_days = settings.history_days,
            "generated mock accounts"
        );

        Self { accounts }
    }
}

impl AccountSource for MockAccountSource {
    fn fetch_account(&self, id: &str) -> Result<AccountRecord, SourceError> {
        find_account(&self.accounts, id)
    }

    fn list_accounts(&self) -> Result<Vec<AccountRecord>, SourceError> {
        Ok(self.accounts.clone())
    }
}

/// The per-account trading style drawn once before the history is simulated.
struct TraderProfile {
    win_probability: f64,
    /// Win and loss sizes in cents, before plan scaling.
    win_cents: (i64, i64),
    loss_cents: (i64, i64),
}

impl TraderProfile {
    fn draw(rng: &mut StdRng) -> Self {
        Self {
            win_probability: rng.random_range(0.40..0.62),
            win_cents: (8_000, rng.random_range(25_000..45_000)),
            loss_cents: (6_000, rng.random_range(18_000..35_000)),
        }
    }
}

#[derive(Default)]
struct InstrumentTally {
    trades: u32,
    wins: u32,
    pnl: Decimal,
}

/// Running totals while a history is simulated.
#[derive(Default)]
struct Tally {
    wins: u32,
    losses: u32,
    gross_profit: Decimal,
    gross_loss: Decimal,
    sessions: BTreeMap<Session, Decimal>,
    days: BTreeMap<TradingDay, Decimal>,
    instruments: BTreeMap<usize, InstrumentTally>,
}

impl Tally {
    fn record(&mut self, pnl: Decimal, session: Session, day: TradingDay, instrument: usize) {
        let entry = self.instruments.entry(instrument).or_default();
        entry.trades += 1;
        entry.pnl += pnl;

        if pnl > Decimal::ZERO {
            self.wins += 1;
            entry.wins += 1;
            self.gross_profit += pnl;
        } else {
            self.losses += 1;
            self.gross_loss += -pnl;
        }

        *self.sessions.entry(session).or_default() += pnl;
        *self.days.entry(day).or_default() += pnl;
    }

    fn total_trades(&self) -> u32 {
        self.wins + self.losses
    }
}

fn generate_account(
    index: usize,
    history_days: usize,
    history_end: NaiveDate,
    rng: &mut StdRng,
) -> AccountRecord {
    let plan = Plan::ALL[index % Plan::ALL.len()];
    let rules = plan.rules();
    let scale = rules.account_size / dec!(50000);
    let profile = TraderProfile::draw(rng);
    let max_loss_level = rules.account_size - rules.max_drawdown;

    let mut tally = Tally::default();
    let mut balance = rules.account_size;
    let mut violated = false;
    // The first entry is the opening balance.
    let mut equity_history = Vec::with_capacity(history_days);
    equity_history.push(balance);

    for offset in (0..history_days.saturating_sub(1)).rev() {
        let date = history_end - Duration::days(offset as i64);
        if let Some(day) = TradingDay::from_weekday(date.weekday()).filter(|_| !violated) {
            let day_pnl = simulate_day(&profile, &rules, scale, day, rng, &mut tally);
            balance += day_pnl;
            if balance <= max_loss_level || -day_pnl >= rules.daily_loss_limit {
                violated = true;
            }
        }
        equity_history.push(balance);
    }

    build_record(index, plan, &rules, equity_history, history_end, tally, violated)
}

/// Simulates one trading day and returns its P&L. Trading stops for the day
/// once the daily loss limit is reached.
fn simulate_day(
    profile: &TraderProfile,
    rules: &PlanRules,
    scale: Decimal,
    day: TradingDay,
    rng: &mut StdRng,
    tally: &mut Tally,
) -> Decimal {
    let trades = rng.random_range(0..=MAX_TRADES_PER_DAY);
    let mut day_pnl = Decimal::ZERO;

    for _ in 0..trades {
        let session = Session::from_hour(rng.random_range(7..=15));
        let instrument = rng.random_range(0..INSTRUMENTS.len());
        let pnl = if rng.random_bool(profile.win_probability) {
            Decimal::new(rng.random_range(profile.win_cents.0..=profile.win_cents.1), 2) * scale
        } else {
            -Decimal::new(rng.random_range(profile.loss_cents.0..=profile.loss_cents.1), 2) * scale
        };

        tally.record(pnl, session, day, instrument);
        day_pnl += pnl;

        if -day_pnl >= rules.daily_loss_limit {
            break;
        }
    }

    day_pnl
}

fn build_record(
    index: usize,
    plan: Plan,
    rules: &PlanRules,
    equity_history: Vec<Decimal>,
    history_end: NaiveDate,
    tally: Tally,
    violated: bool,
) -> AccountRecord {
    let starting_balance = rules.account_size;
    let current_balance = equity_history.last().copied().unwrap_or(starting_balance);
    let recent_start = equity_history.len().saturating_sub(RECENT_WINDOW);
    let drawdown_used = AccountRecord::drawdown_used_from(starting_balance, &equity_history[recent_start..]);

    let total_trades = tally.total_trades();
    let win_rate = ratio_pct(tally.wins, total_trades);
    let avg_win = average(tally.gross_profit, tally.wins);
    let avg_loss = average(tally.gross_loss, tally.losses);

    let instruments = tally
        .instruments
        .iter()
        .map(|(&i, t)| InstrumentStats {
            symbol: INSTRUMENTS[i].to_string(),
            trades: t.trades,
            win_rate: ratio_pct(t.wins, t.trades),
            pnl: t.pnl,
        })
        .collect();

    let session_performance = Session::ALL
        .iter()
        .map(|s| (*s, tally.sessions.get(s).copied().unwrap_or_default()))
        .collect();
    let day_of_week_performance = TradingDay::ALL
        .iter()
        .map(|d| (*d, tally.days.get(d).copied().unwrap_or_default()))
        .collect();

    AccountRecord {
        id: format!("ACC-{}", FIRST_ACCOUNT_NUMBER + index),
        name: format!("{} {}K", plan, rules.account_size / dec!(1000)),
        plan,
        stage: if index % 2 == 0 { Stage::Evaluation } else { Stage::Funded },
        status: if violated { Status::Violated } else { Status::Active },
        starting_balance,
        profit_target: rules.profit_target,
        max_drawdown: rules.max_drawdown,
        daily_loss_limit: rules.daily_loss_limit,
        current_balance,
        closed_pnl: current_balance - starting_balance,
        drawdown_used,
        total_trades,
        win_rate,
        avg_win,
        avg_loss,
        gross_profit: tally.gross_profit,
        gross_loss: tally.gross_loss,
        daily_pnl: AccountRecord::daily_pnl_from_equity(&equity_history),
        equity_history,
        history_end,
        session_performance,
        day_of_week_performance,
        instruments,
    }
}

fn ratio_pct(part: u32, whole: u32) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED).round_dp(2)
}

fn average(total: Decimal, count: u32) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(seed: u64, accounts: usize, history_days: usize) -> GeneratorSettings {
        GeneratorSettings {
            seed,
            accounts,
            history_days,
            history_end: None,
        }
    }

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn same_seed_same_accounts() {
        let a = MockAccountSource::generate(&settings(42, 4, 60), end());
        let b = MockAccountSource::generate(&settings(42, 4, 60), end());
        assert_eq!(a.list_accounts().unwrap(), b.list_accounts().unwrap());
    }

    #[test]
    fn different_seed_different_accounts() {
        let a = MockAccountSource::generate(&settings(1, 1, 60), end());
        let b = MockAccountSource::generate(&settings(2, 1, 60), end());
        assert_ne!(
            a.list_accounts().unwrap()[0].equity_history,
            b.list_accounts().unwrap()[0].equity_history
        );
    }

    #[test]
    fn generated_accounts_are_valid() {
        let source = MockAccountSource::generate(&settings(7, 9, 90), end());
        for account in source.list_accounts().unwrap() {
            assert_eq!(account.validate(), Ok(()), "{}", account.id);
            assert_eq!(account.equity_history.len(), 90);
            assert_eq!(account.history_end, end());
        }
    }

    #[test]
    fn plans_cycle_and_ids_are_sequential() {
        let accounts = MockAccountSource::generate(&settings(3, 4, 10), end())
            .list_accounts()
            .unwrap();
        let plans: Vec<Plan> = accounts.iter().map(|a| a.plan).collect();
        assert_eq!(plans, vec![Plan::Standard, Plan::Advanced, Plan::Dynasty, Plan::Standard]);
        assert_eq!(accounts[0].id, "ACC-1001");
        assert_eq!(accounts[3].id, "ACC-1004");
        assert_eq!(accounts[1].starting_balance, dec!(100000));
    }

    #[test]
    fn single_day_history_is_the_opening_balance() {
        let account = MockAccountSource::generate(&settings(5, 1, 1), end())
            .fetch_account("ACC-1001")
            .unwrap();
        assert_eq!(account.equity_history, vec![dec!(50000)]);
        assert_eq!(account.daily_pnl, vec![Decimal::ZERO]);
        assert_eq!(account.total_trades, 0);
        assert_eq!(account.win_rate, Decimal::ZERO);
    }

    #[test]
    fn totals_agree_with_the_history() {
        let account = MockAccountSource::generate(&settings(11, 1, 90), end())
            .fetch_account("ACC-1001")
            .unwrap();

        let net: Decimal = account.daily_pnl.iter().sum();
        assert_eq!(net, account.closed_pnl);
        assert_eq!(account.gross_profit - account.gross_loss, account.closed_pnl);

        let session_total: Decimal = account.session_performance.values().sum();
        assert_eq!(session_total, account.closed_pnl);

        let instrument_trades: u32 = account.instruments.iter().map(|i| i.trades).sum();
        assert_eq!(instrument_trades, account.total_trades);
    }

    #[test]
    fn weekends_are_flat() {
        let account = MockAccountSource::generate(&settings(13, 1, 30), end())
            .fetch_account("ACC-1001")
            .unwrap();

        for (i, pnl) in account.daily_pnl.iter().enumerate() {
            let date = end() - Duration::days((account.daily_pnl.len() - 1 - i) as i64);
            if TradingDay::from_weekday(date.weekday()).is_none() {
                assert_eq!(*pnl, Decimal::ZERO, "{}", date);
            }
        }
    }

    #[test]
    fn breaching_either_limit_violates_and_freezes_the_account() {
        let accounts = MockAccountSource::generate(&settings(17, 24, 90), end())
            .list_accounts()
            .unwrap();

        for account in accounts {
            let breach = account
                .equity_history
                .iter()
                .zip(&account.daily_pnl)
                .position(|(balance, pnl)| {
                    *balance <= account.max_loss_level() || -*pnl >= account.daily_loss_limit
                });

            match breach {
                Some(index) => {
                    assert_eq!(account.status, Status::Violated, "{}", account.id);
                    assert!(
                        account.daily_pnl[index + 1..].iter().all(|pnl| pnl.is_zero()),
                        "{} kept trading after its breach",
                        account.id
                    );
                }
                None => assert_eq!(account.status, Status::Active, "{}", account.id),
            }
        }
    }

    #[test]
    fn history_ends_on_the_given_date() {
        let other_end = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let account = MockAccountSource::generate(&settings(5, 1, 10), other_end)
            .fetch_account("ACC-1001")
            .unwrap();
        assert_eq!(account.history_end, other_end);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let source = MockAccountSource::generate(&settings(1, 2, 5), end());
        assert!(matches!(
            source.fetch_account("ACC-9999"),
            Err(SourceError::NotFound(id)) if id == "ACC-9999"
        ));
    }
}
