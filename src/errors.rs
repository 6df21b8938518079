use thiserror::Error;

/// Error type that captures ledger normalization and query failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid filter: {0}")]
    InvalidFilterSpec(String),
    #[error("Record `{id}` rejected: {source}")]
    Record {
        id: String,
        #[source]
        source: Box<LedgerError>,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// Attaches the offending record id to a normalization failure.
    pub fn for_record(id: impl Into<String>, source: LedgerError) -> Self {
        LedgerError::Record {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Returns the record id when the error was raised for a specific record.
    pub fn record_id(&self) -> Option<&str> {
        match self {
            LedgerError::Record { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Unwraps record context and returns the underlying failure.
    pub fn root(&self) -> &LedgerError {
        match self {
            LedgerError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
