//! Strongly-typed representations of the check-block API and report data.

mod block;
mod report;

pub use block::{CheckBlockData, CheckBlockResponse, ReportedAddress};
pub use report::{parse_report_timestamp, within_recency_window, ReportRow, RECENCY_WINDOW_DAYS};
