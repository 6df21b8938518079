//! Literal encodings of the transaction kind used by the different store schemas.
//!
//! This table is the only place that knows about the literals; everything else
//! works with [`TransactionType`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{
    domain::TransactionType,
    errors::{LedgerError, LedgerResult},
};

/// Literal family a store expects when reading or writing the kind column.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TypeVocabulary {
    /// `INCOME` / `EXPENSE` (GraphQL enum).
    #[default]
    Canonical,
    /// `entrada` / `saida` (PostgREST text column).
    Legacy,
}

impl TypeVocabulary {
    pub const ALL: [TypeVocabulary; 2] = [TypeVocabulary::Canonical, TypeVocabulary::Legacy];

    /// Write-side literals indexed by [`TransactionType::slot`].
    fn literals(self) -> &'static [&'static str; 2] {
        match self {
            TypeVocabulary::Canonical => &["INCOME", "EXPENSE"],
            TypeVocabulary::Legacy => &["entrada", "saida"],
        }
    }
}

/// Extra spellings accepted on read only.
const READ_ALIASES: [(&str, TransactionType); 1] = [("saída", TransactionType::Expense)];

static LITERAL_INDEX: Lazy<HashMap<String, TransactionType>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for vocabulary in TypeVocabulary::ALL {
        for kind in TransactionType::ALL {
            index.insert(vocabulary.literals()[kind.slot()].to_lowercase(), kind);
        }
    }
    for (alias, kind) in READ_ALIASES {
        index.insert(alias.to_string(), kind);
    }
    index
});

/// Maps a literal from either vocabulary (case-insensitive) to the canonical kind.
pub fn normalize_type(raw: &str) -> LedgerResult<TransactionType> {
    LITERAL_INDEX
        .get(&raw.trim().to_lowercase())
        .copied()
        .ok_or_else(|| LedgerError::UnknownTransactionType(raw.to_string()))
}

/// Literal to store for `kind` in a schema that speaks `vocabulary`.
pub fn denormalize_type(kind: TransactionType, vocabulary: TypeVocabulary) -> &'static str {
    vocabulary.literals()[kind.slot()]
}
