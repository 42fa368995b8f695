//! Common error types

use thiserror::Error;

/// Errors raised while parsing domain values from strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown payment status
    #[error("invalid payment status: {0}")]
    PaymentStatus(String),

    /// Unknown period token
    #[error("invalid period: {0}")]
    Period(String),
}
