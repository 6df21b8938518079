//! Terminal presentation used by the `financy_report` binary.

pub mod output;
pub mod report;
