use serde::{Deserialize, Serialize};

use crate::{
    domain::{category::Category, transaction::RawTransaction},
    errors::LedgerResult,
};

/// Point-in-time export of one user's categories and transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

impl Snapshot {
    pub fn from_json(data: &str) -> LedgerResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
