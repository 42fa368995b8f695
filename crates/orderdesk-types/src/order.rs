//! Order types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ParseError, UserId};

/// Sentinel value the analysis service writes into a status column when done
pub const ANALYSIS_DONE: &str = "Done";

/// Unique order identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Parse an order ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// First eight characters of the hyphenated id, used in references and filenames
    pub fn short(&self) -> String {
        self.0.to_string().chars().take(8).collect()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Payment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment
    Pending,
    /// Paid
    Paid,
}

impl PaymentStatus {
    /// Database / wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(ParseError::PaymentStatus(s.to_string())),
        }
    }
}

/// A one-time purchase of the analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub company_name: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub quick_status: Option<String>,
    pub full_status: Option<String>,
    pub total_cost_cents: i64,
    pub user_id: Option<UserId>,
    pub company_registry_code: Option<String>,
    pub company_address: Option<String>,
    pub bill_to: Option<String>,
    pub bill_to_address: Option<String>,
}

impl Order {
    /// Quick analysis has completed
    pub fn is_quick_done(&self) -> bool {
        self.quick_status.as_deref() == Some(ANALYSIS_DONE)
    }

    /// Full analysis has completed
    pub fn is_full_done(&self) -> bool {
        self.full_status.as_deref() == Some(ANALYSIS_DONE)
    }

    /// Customer name as "first last", trimmed
    pub fn customer_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// Client-side filter over the currently loaded page of orders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderFilter {
    /// No filtering
    #[default]
    All,
    /// Only paid orders
    PaidOnly,
    /// Full analysis completed
    FullAnalysisDone,
    /// Quick analysis completed but full analysis not
    QuickAnalysisOnly,
}

impl OrderFilter {
    /// Whether an order passes this filter
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::PaidOnly => order.payment_status == PaymentStatus::Paid,
            Self::FullAnalysisDone => order.is_full_done(),
            Self::QuickAnalysisOnly => order.is_quick_done() && !order.is_full_done(),
        }
    }

    /// Whether a filter other than `All` is active
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::All)
    }
}
