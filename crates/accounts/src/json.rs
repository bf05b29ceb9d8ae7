use crate::error::SourceError;
use crate::{AccountSource, find_account};
use core_types::AccountRecord;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// An `AccountSource` over snapshots exported by an account service as a JSON array.
///
/// Records are validated once on load; a single bad record rejects the whole file.
#[derive(Debug, Clone)]
pub struct JsonAccountSource {
    accounts: Vec<AccountRecord>,
}

impl JsonAccountSource {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path)?;
        let source = Self::from_json_str(&contents)?;
        info!(path = %path.display(), accounts = source.accounts.len(), "loaded accounts file");
        Ok(source)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let accounts: Vec<AccountRecord> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for account in &accounts {
            if !seen.insert(account.id.as_str()) {
                return Err(SourceError::DuplicateId(account.id.clone()));
            }
            if let Err(source) = account.validate() {
                warn!(account_id = %account.id, error = %source, "rejecting invalid account record");
                return Err(SourceError::Invalid {
                    id: account.id.clone(),
                    source,
                });
            }
        }

        Ok(Self { accounts })
    }
}

impl AccountSource for JsonAccountSource {
    fn fetch_account(&self, id: &str) -> Result<AccountRecord, SourceError> {
        find_account(&self.accounts, id)
    }

    fn list_accounts(&self) -> Result<Vec<AccountRecord>, SourceError> {
        Ok(self.accounts.clone())
    }
}
