//! Prefix list normalization.

use std::collections::HashSet;

/// Trim and deduplicate a prefix list, keeping first-seen order.
///
/// Duplicate detection happens after whitespace trimming, so `"10.0.0.0/8"`
/// and `" 10.0.0.0/8 "` collapse to one entry.
#[must_use]
pub fn dedup_prefixes<I, S>(prefixes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for prefix in prefixes {
        let trimmed = prefix.as_ref().trim();
        if seen.insert(trimmed.to_string()) {
            unique.push(trimmed.to_string());
        }
    }

    unique
}
