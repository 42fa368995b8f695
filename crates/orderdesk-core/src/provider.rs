//! External service abstractions
//!
//! The back-office delegates user management, the analysis itself and PDF
//! layout to other services. These traits let the services be exercised
//! against in-memory doubles.

use async_trait::async_trait;

use orderdesk_types::{DirectoryUser, InvoiceId, OrderId, UserId};

use crate::CoreError;

/// Managed authentication provider (admin side)
#[async_trait]
pub trait AuthDirectory: Send + Sync {
    /// One page of the user directory (1-based)
    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<DirectoryUser>, CoreError>;

    /// Look up a single user; `None` when it does not exist
    async fn get_user(&self, id: &UserId) -> Result<Option<DirectoryUser>, CoreError>;

    /// Replace a user's password
    async fn update_password(&self, id: &UserId, password: &str) -> Result<(), CoreError>;

    /// Generate a one-time sign-in link, returning its URL
    async fn generate_magic_link(&self, email: &str) -> Result<String, CoreError>;
}

/// External analysis service
#[async_trait]
pub trait AnalysisRunner: Send + Sync {
    /// Start the full analysis of an order on behalf of its owner
    async fn start_full_analysis(&self, order_id: &OrderId, user_id: &UserId)
        -> Result<(), CoreError>;
}

/// External PDF renderer
#[async_trait]
pub trait InvoiceRenderer: Send + Sync {
    /// Render a stored invoice to PDF bytes
    async fn render(&self, invoice_id: &InvoiceId) -> Result<Vec<u8>, CoreError>;
}
