//! Orderdesk Types - Shared domain types
//!
//! This crate contains domain types used across the orderdesk crates:
//! - Orders and payment status
//! - Directory users and profiles
//! - Invoices and statistics snapshots
//! - Pagination, search predicates and date windows
//! - HTTP request/response bodies of the admin API

pub mod api;
pub mod error;
pub mod filter;
pub mod invoice;
pub mod order;
pub mod pagination;
pub mod statistics;
pub mod user;

pub use error::*;
pub use filter::*;
pub use invoice::*;
pub use order::*;
pub use pagination::*;
pub use statistics::*;
pub use user::*;
