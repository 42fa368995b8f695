//! Query composition
//!
//! Turns raw search strings and period parameters into the storage-agnostic
//! predicates in [`orderdesk_types::filter`]. Everything here is pure.

use std::collections::HashSet;
use std::hash::Hash;

use chrono::{DateTime, Duration, Months, TimeZone, Utc};

use orderdesk_types::{DateWindow, PeriodToken, TextMatch, WindowSelector};

use crate::CoreError;

/// Primary results below this count trigger the full-text supplement
pub const FULL_TEXT_THRESHOLD: usize = 5;

/// Shortest query (in characters) eligible for full-text search
pub const FULL_TEXT_MIN_CHARS: usize = 3;

/// A validated, normalized search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    normalized: String,
    uuid_like: bool,
}

impl SearchQuery {
    /// Trim and lower-case a raw query; empty input is rejected
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::Validation("Search query is required".to_string()));
        }

        let uuid_like = is_uuid_like(&normalized);
        Ok(Self {
            normalized,
            uuid_like,
        })
    }

    /// Parse an optional query parameter
    pub fn from_param(raw: Option<&str>) -> Result<Self, CoreError> {
        Self::parse(raw.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn is_uuid_like(&self) -> bool {
        self.uuid_like
    }

    /// Predicate for the primary search
    pub fn predicate(&self) -> TextMatch {
        if self.uuid_like {
            TextMatch::IdPrefix(self.normalized.clone())
        } else {
            TextMatch::AnyFieldContains(self.normalized.clone())
        }
    }

    /// Whether the primary results should be supplemented by full-text search
    pub fn wants_full_text(&self, primary_len: usize) -> bool {
        !self.uuid_like
            && primary_len < FULL_TEXT_THRESHOLD
            && self.normalized.chars().count() >= FULL_TEXT_MIN_CHARS
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Whether a normalized query looks like (part of) an identifier.
///
/// Matches a full `8-4-4-4-12` UUID, or any string of at least eight
/// characters made only of hex digits and hyphens.
pub fn is_uuid_like(s: &str) -> bool {
    if is_full_uuid(s) {
        return true;
    }
    s.len() >= 8 && s.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

fn is_full_uuid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Primary items first in their order, then supplemental items whose key
/// was not seen yet, in supplemental order.
pub fn merge_unique<T, K, F>(primary: Vec<T>, supplemental: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(primary.len() + supplemental.len());
    let mut merged = Vec::with_capacity(primary.len() + supplemental.len());

    for item in primary.into_iter().chain(supplemental) {
        if seen.insert(key(&item)) {
            merged.push(item);
        }
    }

    merged
}

/// Build a window selector from the `period`, `from` and `to` parameters.
///
/// An explicit range wins over `period`; an unknown or absent period means
/// all time.
pub fn window_selector(
    period: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<WindowSelector, CoreError> {
    let from = from.map(str::trim).filter(|s| !s.is_empty());
    let to = to.map(str::trim).filter(|s| !s.is_empty());

    match (from, to) {
        (Some(from), Some(to)) => {
            let from = parse_timestamp("from", from)?;
            let to = parse_timestamp("to", to)?;
            if from > to {
                return Err(CoreError::Validation(
                    "'from' must not be after 'to'".to_string(),
                ));
            }
            Ok(WindowSelector::Custom { from, to })
        }
        (None, None) => Ok(WindowSelector::Preset(
            period
                .and_then(|p| p.trim().parse::<PeriodToken>().ok())
                .unwrap_or_default(),
        )),
        _ => Err(CoreError::Validation(
            "Both 'from' and 'to' are required for a custom range".to_string(),
        )),
    }
}

fn parse_timestamp(name: &str, value: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| CoreError::Validation(format!("Invalid '{name}' timestamp: {value}")))
}

/// Resolve a selector into concrete bounds relative to `now`.
///
/// `today` starts at midnight in `now`'s own timezone; month-based periods
/// step back in calendar months.
pub fn resolve_window<Tz: TimeZone>(selector: &WindowSelector, now: DateTime<Tz>) -> DateWindow {
    let token = match selector {
        WindowSelector::Custom { from, to } => return DateWindow::between(*from, *to),
        WindowSelector::Preset(token) => *token,
    };

    let start = match token {
        PeriodToken::All => return DateWindow::unbounded(),
        PeriodToken::Today => local_midnight(&now),
        PeriodToken::Last7Days => now.clone() - Duration::days(7),
        PeriodToken::Last30Days => now.clone() - Duration::days(30),
        PeriodToken::Last3Months => months_before(&now, 3),
        PeriodToken::Last6Months => months_before(&now, 6),
        PeriodToken::LastYear => months_before(&now, 12),
    };

    DateWindow::since(start.with_timezone(&Utc))
}

fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| now.timezone().from_local_datetime(&midnight).earliest())
        .unwrap_or_else(|| now.clone())
}

fn months_before<Tz: TimeZone>(now: &DateTime<Tz>, months: u32) -> DateTime<Tz> {
    now.clone()
        .checked_sub_months(Months::new(months))
        .unwrap_or_else(|| now.clone())
}
