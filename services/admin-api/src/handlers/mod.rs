//! REST API handlers

pub mod health;
pub mod invoices;
pub mod orders;
pub mod shared;
pub mod statistics;
pub mod users;

pub use health::*;
pub use invoices::*;
pub use orders::*;
pub use statistics::*;
pub use users::*;
