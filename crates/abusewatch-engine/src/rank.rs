//! Severity ranking of the aggregate result.

use abusewatch_core::ReportRow;

/// Sort rows by abuse confidence score, descending.
///
/// The sort is stable: rows with equal scores keep the order in which the
/// workers appended them.
pub fn rank_rows(rows: &mut [ReportRow]) {
    rows.sort_by(|a, b| b.abuse_confidence_score.cmp(&a.abuse_confidence_score));
}
