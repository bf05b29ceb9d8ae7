//! # Propdesk Accounts
//!
//! Where `AccountRecord`s come from. The dashboard only ever talks to the
//! [`AccountSource`] trait; callers construct and own the concrete source.
//!
//! - [`MockAccountSource`]: a deterministic, seeded generator of synthetic accounts.
//! - [`JsonAccountSource`]: snapshots loaded from a JSON file, validated on load.

use core_types::AccountRecord;

pub mod error;
pub mod json;
pub mod mock;

pub use error::SourceError;
pub use json::JsonAccountSource;
pub use mock::MockAccountSource;

/// A provider of account snapshots.
///
/// Each call returns a fresh, owned record; callers never hold references into the source.
pub trait AccountSource {
    fn fetch_account(&self, id: &str) -> Result<AccountRecord, SourceError>;

    /// All accounts, in the source's listing order.
    fn list_accounts(&self) -> Result<Vec<AccountRecord>, SourceError>;
}

/// Looks an account up by id in an in-memory list.
fn find_account(accounts: &[AccountRecord], id: &str) -> Result<AccountRecord, SourceError> {
    accounts
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .ok_or_else(|| SourceError::NotFound(id.to_string()))
}
