#![doc(test(attr(deny(warnings))))]

//! Financy Core normalizes raw ledger records and derives the balance,
//! monthly totals, category breakdowns and paginated transaction lists that a
//! personal finance tracker shows.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod period;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Financy Core tracing initialized.");
    });
}
