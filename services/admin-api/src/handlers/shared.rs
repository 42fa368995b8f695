//! Shared handler utilities

use std::time::Instant;

use uuid::Uuid;

use crate::error::ApiError;

/// Default page size of the orders listing
pub const ORDERS_PAGE_SIZE: u32 = 15;

/// Default page size of the users listing
pub const USERS_PAGE_SIZE: u32 = 20;

/// Record operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "orderdesk_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

/// Parse a required id carried in a JSON body
pub fn required_id(value: Option<&str>, label: &str) -> Result<Uuid, ApiError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{label} is required")))?;

    Uuid::parse_str(value).map_err(|_| ApiError::BadRequest(format!("Invalid {label}")))
}
