//! # Propdesk Core Types
//!
//! The shared data model for the trader dashboard: the `AccountRecord` snapshot
//! supplied by an account data source, the enums that classify it, and the plan
//! catalog used for pricing and for the risk parameters of new accounts.
//!
//! This crate has no knowledge of how records are fetched or presented.

pub mod enums;
pub mod error;
pub mod plans;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Plan, Session, Stage, Status, TradingDay};
pub use error::CoreError;
pub use plans::PlanRules;
pub use structs::{AccountRecord, InstrumentStats};
