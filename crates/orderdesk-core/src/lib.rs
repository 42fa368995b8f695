//! Orderdesk Core - Back-office business logic
//!
//! Search composition, order and user listings, statistics and invoice
//! resolution, plus the HTTP clients for the external services the
//! back-office delegates to (auth directory, analysis service, PDF renderer).
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_core::{DeskConfig, HttpAnalysisRunner, OrderService};
//! use orderdesk_db::Repositories;
//! use std::sync::Arc;
//!
//! let config = DeskConfig::new(
//!     "https://project.supabase.co",
//!     "service-role-key",
//!     "https://analysis.internal",
//!     "analysis-token",
//!     "https://renderer.internal",
//! );
//!
//! let repos = Repositories::new(pool);
//! let orders = OrderService::new(
//!     Arc::new(repos.orders),
//!     Arc::new(HttpAnalysisRunner::new(&config)),
//! );
//!
//! let page = orders.list(1, 15).await?;
//! let hits = orders.search("acme").await?;
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod gotrue;
pub mod invoice;
pub mod orders;
pub mod provider;
pub mod query;
pub mod statistics;
pub mod users;

pub use config::{DeskConfig, InvoicePricing};
pub use error::CoreError;
pub use external::{HttpAnalysisRunner, HttpInvoiceRenderer};
pub use gotrue::GoTrueDirectory;
pub use invoice::{InvoiceDraft, InvoiceOverrides, InvoiceService, RenderedPdf};
pub use orders::OrderService;
pub use provider::{AnalysisRunner, AuthDirectory, InvoiceRenderer};
pub use query::{resolve_window, window_selector, SearchQuery};
pub use statistics::StatisticsService;
pub use users::UserService;

/// Validate 1-based page parameters shared by every listing
pub fn validate_page(page: u32, page_size: u32) -> Result<(), CoreError> {
    if page < 1 {
        return Err(CoreError::Validation("page must be at least 1".to_string()));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(CoreError::Validation(format!(
            "pageSize must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

/// Largest accepted page size
pub const MAX_PAGE_SIZE: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_page() {
        assert!(validate_page(1, 15).is_ok());
        assert!(validate_page(7, MAX_PAGE_SIZE).is_ok());
        assert!(validate_page(0, 15).is_err());
        assert!(validate_page(1, 0).is_err());
        assert!(validate_page(1, MAX_PAGE_SIZE + 1).is_err());
    }
}
