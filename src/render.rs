//! Terminal tables for the CLI commands.

use analytics::{AccountProgress, DerivedMetrics};
use charting::ChartDataPoint;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};
use configuration::DashboardSettings;
use core_types::{AccountRecord, PlanRules, Status};
use rust_decimal::Decimal;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn pct(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

/// A right-aligned amount, green when positive and red when negative.
fn signed_cell(value: Decimal) -> Cell {
    let cell = Cell::new(money(value)).set_alignment(CellAlignment::Right);
    if value > Decimal::ZERO {
        cell.fg(Color::Green)
    } else if value < Decimal::ZERO {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

pub fn plans_table(catalog: &[PlanRules]) -> Table {
    let mut table = new_table(vec![
        "Plan",
        "Account Size",
        "Price / Month",
        "Profit Target",
        "Max Drawdown",
        "Daily Loss Limit",
        "Profit Split",
    ]);
    for rules in catalog {
        table.add_row(vec![
            Cell::new(rules.plan),
            Cell::new(money(rules.account_size)),
            Cell::new(money(rules.monthly_price)),
            Cell::new(format!("{} ({})", money(rules.profit_target), pct(rules.profit_target_pct()))),
            Cell::new(money(rules.max_drawdown)),
            Cell::new(money(rules.daily_loss_limit)),
            Cell::new(pct(rules.profit_split_pct)),
        ]);
    }
    table
}

pub fn accounts_table(accounts: &[AccountRecord]) -> Table {
    let mut table = new_table(vec![
        "Id", "Name", "Plan", "Stage", "Status", "Balance", "Closed P&L", "Drawdown Used",
    ]);
    for account in accounts {
        let status = match account.status {
            Status::Active => Cell::new(account.status).fg(Color::Green),
            Status::Violated => Cell::new(account.status).fg(Color::Red),
            Status::Closed => Cell::new(account.status),
        };
        table.add_row(vec![
            Cell::new(&account.id),
            Cell::new(&account.name),
            Cell::new(account.plan),
            Cell::new(account.stage),
            status,
            Cell::new(money(account.current_balance)).set_alignment(CellAlignment::Right),
            signed_cell(account.closed_pnl),
            Cell::new(money(account.drawdown_used)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn summary_table(
    account: &AccountRecord,
    metrics: &DerivedMetrics,
    dashboard: &DashboardSettings,
) -> Table {
    let mut table = new_table(vec!["Metric", "Value"]);
    let profit_factor = format!(
        "{} ({} of {:.2} target)",
        metrics.profit_factor,
        pct(metrics.profit_factor_progress_pct),
        dashboard.profit_factor_target
    );

    table
        .add_row(vec![Cell::new("Account"), Cell::new(format!("{} ({})", account.name, account.id))])
        .add_row(vec![Cell::new("Total Trades"), Cell::new(account.total_trades)])
        .add_row(vec![Cell::new("Win Rate"), Cell::new(pct(account.win_rate))])
        .add_row(vec![Cell::new("Avg Win"), Cell::new(money(account.avg_win))])
        .add_row(vec![Cell::new("Avg Loss"), Cell::new(money(account.avg_loss))])
        .add_row(vec![Cell::new("Profit Factor"), Cell::new(profit_factor)])
        .add_row(vec![
            Cell::new("Profit Factor (chart value)"),
            Cell::new(money(metrics.profit_factor.display_value(dashboard.profit_factor_display_cap))),
        ])
        .add_row(vec![Cell::new("Risk:Reward"), Cell::new(format!("1:{:.2}", metrics.risk_reward))])
        .add_row(vec![Cell::new("Expectancy"), signed_cell(metrics.expectancy)]);
    table
}

pub fn progress_table(progress: &AccountProgress) -> Table {
    let mut table = new_table(vec!["Progress", "Value"]);
    let rows = [
        ("Profit Target", pct(progress.profit_target_progress_pct)),
        ("Drawdown Used", pct(progress.drawdown_used_pct)),
        ("Drawdown Remaining", money(progress.drawdown_remaining)),
        ("Daily Loss Used", money(progress.daily_loss_used)),
        ("Daily Loss Remaining", money(progress.daily_loss_remaining)),
        ("Trading Days", progress.trading_days.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

pub fn breakdown_table(metrics: &DerivedMetrics) -> Table {
    let mut table = new_table(vec!["Breakdown", "Bucket", "P&L"]);
    table
        .add_row(vec![
            Cell::new("Best Session"),
            Cell::new(metrics.best_session.session),
            signed_cell(metrics.best_session.pnl),
        ])
        .add_row(vec![
            Cell::new("Worst Session"),
            Cell::new(metrics.worst_session.session),
            signed_cell(metrics.worst_session.pnl),
        ])
        .add_row(vec![
            Cell::new("Best Day"),
            Cell::new(metrics.best_day.day),
            signed_cell(metrics.best_day.pnl),
        ])
        .add_row(vec![
            Cell::new("Worst Day"),
            Cell::new(metrics.worst_day.day),
            signed_cell(metrics.worst_day.pnl),
        ]);
    table
}

pub fn instrument_table(metrics: &DerivedMetrics) -> Table {
    let mut table = new_table(vec!["Rank", "Instrument", "Trades", "Win Rate", "P&L"]);
    for row in &metrics.instrument_ranking {
        let symbol = if row.top_performer {
            Cell::new(format!("{} ★", row.symbol)).fg(Color::Yellow)
        } else {
            Cell::new(&row.symbol)
        };
        table.add_row(vec![
            Cell::new(row.rank),
            symbol,
            Cell::new(row.trades),
            Cell::new(pct(row.win_rate)),
            signed_cell(row.pnl),
        ]);
    }

    let summary = &metrics.instrument_summary;
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(summary.most_profitable.as_deref().unwrap_or("-")),
        Cell::new(summary.total_trades),
        Cell::new(""),
        signed_cell(summary.total_pnl),
    ]);
    table
}

pub fn chart_table(points: &[ChartDataPoint]) -> Table {
    let mut table = new_table(vec!["Time", "Balance", "P&L", "Max Loss", "Profit Target"]);
    for point in points {
        table.add_row(vec![
            Cell::new(&point.label),
            Cell::new(money(point.balance)).set_alignment(CellAlignment::Right),
            signed_cell(point.pnl),
            Cell::new(money(point.max_loss)).set_alignment(CellAlignment::Right),
            Cell::new(money(point.profit_target)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
