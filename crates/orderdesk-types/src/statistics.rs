//! Statistics snapshot

use serde::{Deserialize, Serialize};

/// Dashboard counts for one time window. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub paid_orders_count: u64,
    pub quick_analyses_count: u64,
    pub full_analyses_count: u64,
    pub users_count: u64,
    /// Period token, or "custom" for an explicit range
    pub period: String,
}
