use accounts::{AccountSource, MockAccountSource};
use analytics::{AnalyticsEngine, ProfitFactor};
use chrono::NaiveDate;
use configuration::GeneratorSettings;
use core_types::{AccountRecord, Session};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn generated_accounts() -> Vec<AccountRecord> {
    let settings = GeneratorSettings {
        seed: 42,
        accounts: 12,
        history_days: 90,
        history_end: None,
    };
    let end = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    MockAccountSource::generate(&settings, end)
        .list_accounts()
        .unwrap()
}

#[test]
fn metrics_are_consistent_with_generated_records() {
    let engine = AnalyticsEngine::new();

    for account in generated_accounts() {
        let metrics = engine.calculate(&account);

        match metrics.profit_factor {
            ProfitFactor::Finite(value) if account.gross_loss > Decimal::ZERO => {
                assert_eq!(value, account.gross_profit / account.gross_loss);
            }
            ProfitFactor::Finite(value) => assert_eq!(value, Decimal::ZERO),
            ProfitFactor::Unbounded => {
                assert!(account.gross_loss.is_zero());
                assert!(account.gross_profit > Decimal::ZERO);
            }
        }

        let best = metrics.best_session.pnl;
        assert!(Session::ALL.iter().all(|s| account.session_pnl(*s) <= best));
        assert!(metrics.progress.profit_target_progress_pct <= dec!(100));
        assert!(metrics.progress.drawdown_used_pct >= Decimal::ZERO);

        let rates: Vec<Decimal> = metrics.instrument_ranking.iter().map(|r| r.win_rate).collect();
        assert!(rates.windows(2).all(|w| w[0] >= w[1]), "{}", account.id);
        assert_eq!(metrics.instrument_summary.total_trades, account.total_trades);
    }
}

#[test]
fn recalculation_is_deterministic() {
    let engine = AnalyticsEngine::new();
    let account = generated_accounts().remove(0);

    assert_eq!(engine.calculate(&account), engine.calculate(&account));
}
