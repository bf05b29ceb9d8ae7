//! # Propdesk Analytics
//!
//! Derives the dashboard's performance metrics from an account snapshot.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate depends only on `core-types`. It has no knowledge of
//!   where accounts come from or how the results are displayed.
//! - **Stateless Calculation:** `AnalyticsEngine` takes an `AccountRecord` and returns a
//!   fresh `DerivedMetrics`. Nothing is cached between calls, so results can never go stale.
//! - **No Error Paths:** Zero denominators and missing breakdown entries degrade to zero
//!   values. Validating records is the data source's job.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The calculator.
//! - `DerivedMetrics`: Profit factor, risk:reward, expectancy, rankings and progress cards.
//! - `ProfitFactor`: A finite ratio, or `Unbounded` when there were no losses.

pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, DEFAULT_PROFIT_FACTOR_TARGET};
pub use report::{
    AccountProgress, DayResult, DerivedMetrics, InstrumentSummary, ProfitFactor,
    RankedInstrument, SessionResult,
};
