pub mod category;
pub mod common;
pub mod snapshot;
pub mod summary;
pub mod transaction;

pub use category::{Category, CategoryColor, CategoryIcon};
pub use common::{Identifiable, NamedEntity};
pub use snapshot::Snapshot;
pub use summary::{
    BreakdownOptions, CategoryBucket, CategorySpend, CategoryStats, CategoryUsage,
    DashboardOptions, DashboardSummary, PeriodTotals,
};
pub use transaction::{RawDecimal, RawTransaction, Transaction, TransactionType};
