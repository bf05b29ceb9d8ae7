use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("No account with id '{0}'")]
    NotFound(String),

    #[error("Account id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("Failed to read account data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse account data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Account '{id}' failed validation: {source}")]
    Invalid {
        id: String,
        #[source]
        source: CoreError,
    },
}
