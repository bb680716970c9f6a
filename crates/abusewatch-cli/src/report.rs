//! HTML report rendering.
//!
//! Produces a standalone Bootstrap-styled page with one table row per
//! reported address. The only contract with the engine is that rows arrive
//! already sorted in descending score order.

use abusewatch_core::ReportRow;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::Path;

/// Render the report and write it to `path`
pub fn render_report(rows: &[ReportRow], generated_at: DateTime<Local>, path: &Path) -> Result<()> {
    let html = render_html(rows, generated_at);
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Bootstrap contextual class for a score badge
fn score_class(score: u8) -> &'static str {
    match score {
        75.. => "danger",
        50..=74 => "warning",
        1..=49 => "info",
        0 => "secondary",
    }
}

/// Minimal HTML escaping for text nodes and attribute values
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_html(rows: &[ReportRow], generated_at: DateTime<Local>) -> String {
    let mut body = String::new();

    if rows.is_empty() {
        body.push_str(
            r#"            <tr><td colspan="5" class="text-center text-muted">No reported IPs in the last 7 days.</td></tr>
"#,
        );
    } else {
        for row in rows {
            let _ = writeln!(
                body,
                r#"            <tr>
              <td><code>{ip}</code></td>
              <td>{country}</td>
              <td>{reports}</td>
              <td><span class="badge bg-{class}">{score}</span></td>
              <td>{last}</td>
            </tr>"#,
                ip = escape(&row.ip_address),
                country = escape(&row.country_code),
                reports = row.num_reports,
                class = score_class(row.abuse_confidence_score),
                score = row.abuse_confidence_score,
                last = row.last_reported_at.to_rfc3339(),
            );
        }
    }

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>AbuseIPDB Report</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
  </head>
  <body>
    <div class="container py-4">
      <h1 class="mb-4">AbuseIPDB Last 7 Days Report</h1>
      <p class="text-muted mb-3">Generated: {timestamp}</p>
      <div class="table-responsive">
        <table class="table table-striped table-hover align-middle">
          <thead class="table-dark">
            <tr>
              <th>IP Address</th>
              <th>Country Code</th>
              <th>Num Reports</th>
              <th>Abuse Confidence Score</th>
              <th>Last Reported At</th>
            </tr>
          </thead>
          <tbody>
{body}          </tbody>
        </table>
      </div>
    </div>
  </body>
</html>
"#,
        timestamp = generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}
