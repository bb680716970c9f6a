use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::ReportedAddress;

/// Width of the recency window, in days
pub const RECENCY_WINDOW_DAYS: i64 = 7;

/// Fallback wire format: naive date-time followed by a timezone abbreviation
const FALLBACK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One recently-reported IP address, ready for ranking and rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The reported IP address
    pub ip_address: String,

    /// Two-letter country code, empty when the API has none
    pub country_code: String,

    /// Number of abuse reports filed against the address
    pub num_reports: u32,

    /// Abuse confidence score (0-100, higher = more confidence)
    pub abuse_confidence_score: u8,

    /// When the address was last reported
    pub last_reported_at: DateTime<Utc>,
}

impl ReportedAddress {
    /// Materialize a [`ReportRow`] from this wire entry.
    ///
    /// Returns `None` when the entry has no timestamp, the timestamp does not
    /// parse in either supported format, or the most recent report is not
    /// strictly within the recency window of `now`. Dropped entries are not
    /// errors; the API routinely returns stale history.
    #[must_use]
    pub fn into_row(self, now: DateTime<Utc>) -> Option<ReportRow> {
        if self.most_recent_report.is_empty() {
            return None;
        }

        let last_reported_at = parse_report_timestamp(&self.most_recent_report)?;
        if !within_recency_window(last_reported_at, now) {
            return None;
        }

        Some(ReportRow {
            ip_address: self.ip_address,
            country_code: self.country_code.unwrap_or_default(),
            num_reports: self.num_reports,
            abuse_confidence_score: self.abuse_confidence_score,
            last_reported_at,
        })
    }
}

/// Parse a `mostRecentReport` timestamp.
///
/// The API normally emits RFC 3339 with an offset. Some historical entries
/// instead use `YYYY-MM-DD HH:MM:SS TZABBR`; abbreviations carry no offset
/// information, so the naive portion is interpreted as UTC.
#[must_use]
pub fn parse_report_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }

    let (datetime, abbrev) = raw.trim().rsplit_once(' ')?;
    if abbrev.is_empty() || !abbrev.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(datetime, FALLBACK_FORMAT).ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Returns true if `reported` is strictly within the recency window of `now`.
///
/// Reports exactly at the boundary are excluded.
#[must_use]
pub fn within_recency_window(reported: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(reported) < Duration::days(RECENCY_WINDOW_DAYS)
}
