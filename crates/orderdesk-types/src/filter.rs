//! Search predicates and date windows.
//!
//! These are the storage-agnostic descriptions produced by the query
//! composer; the database layer translates them into SQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Text predicate for a search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextMatch {
    /// Identifier starts with the given (lower-case) string
    IdPrefix(String),
    /// Any of the searchable text fields contains the string, case-insensitively
    AnyFieldContains(String),
}

impl TextMatch {
    /// The normalized needle carried by the predicate
    pub fn needle(&self) -> &str {
        match self {
            Self::IdPrefix(s) | Self::AnyFieldContains(s) => s,
        }
    }
}

/// Which orders a statistics count covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderCount {
    /// `payment_status = 'paid'`
    Paid,
    /// `quick_status = 'Done'`
    QuickAnalysisDone,
    /// `full_status = 'Done'`
    FullAnalysisDone,
}

/// Bounds on a creation timestamp. Both ends are inclusive; `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateWindow {
    /// No bound at all
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// `created_at >= from`
    pub const fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// `from <= created_at <= to`
    pub const fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Whether neither end is bounded
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether a timestamp lies inside the window
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| at >= from) && self.to.map_or(true, |to| at <= to)
    }
}

/// Symbolic time window selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodToken {
    /// No bound
    #[default]
    #[serde(rename = "all")]
    All,
    /// Since local midnight
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "3months")]
    Last3Months,
    #[serde(rename = "6months")]
    Last6Months,
    #[serde(rename = "1year")]
    LastYear,
}

impl PeriodToken {
    /// Wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Last7Days => "7days",
            Self::Last30Days => "30days",
            Self::Last3Months => "3months",
            Self::Last6Months => "6months",
            Self::LastYear => "1year",
        }
    }
}

impl std::fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PeriodToken {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "7days" => Ok(Self::Last7Days),
            "30days" => Ok(Self::Last30Days),
            "3months" => Ok(Self::Last3Months),
            "6months" => Ok(Self::Last6Months),
            "1year" => Ok(Self::LastYear),
            _ => Err(ParseError::Period(s.to_string())),
        }
    }
}

/// A preset period or an explicit inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSelector {
    Preset(PeriodToken),
    Custom {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

impl WindowSelector {
    /// Label reported alongside statistics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Preset(token) => token.as_str(),
            Self::Custom { .. } => "custom",
        }
    }

    /// Whether this is the all-time preset
    pub fn is_all_time(&self) -> bool {
        matches!(self, Self::Preset(PeriodToken::All))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_round_trip_strings() {
        for token in [
            PeriodToken::All,
            PeriodToken::Today,
            PeriodToken::Last7Days,
            PeriodToken::Last30Days,
            PeriodToken::Last3Months,
            PeriodToken::Last6Months,
            PeriodToken::LastYear,
        ] {
            assert_eq!(token.as_str().parse::<PeriodToken>(), Ok(token));
        }
        assert!("90days".parse::<PeriodToken>().is_err());
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let window = DateWindow::between(from, to);
        assert!(window.contains(from));
        assert!(window.contains(to));
        assert!(!window.contains(from - chrono::Duration::seconds(1)));
        assert!(!window.contains(to + chrono::Duration::seconds(1)));
        assert!(DateWindow::unbounded().contains(from));
    }

    #[test]
    fn test_selector_label() {
        let now = Utc::now();
        assert_eq!(WindowSelector::Preset(PeriodToken::Last7Days).label(), "7days");
        assert_eq!(WindowSelector::Custom { from: now, to: now }.label(), "custom");
        assert!(WindowSelector::Preset(PeriodToken::All).is_all_time());
    }
}
