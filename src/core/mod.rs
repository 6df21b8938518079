pub mod pagination;
pub mod query;
pub mod services;

pub use pagination::{build_page_tokens, page_bounds, total_pages, PageBounds, PageToken};
pub use query::{CategoryFilter, SortOrder, TransactionPage, TransactionQuery, TypeFilter};
