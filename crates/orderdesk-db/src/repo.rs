//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use orderdesk_types::{DateWindow, OrderCount, TextMatch};

use crate::error::DbResult;
use crate::models::*;

/// Order repository trait
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<OrderRow>>;

    /// Exact number of orders
    async fn count_all(&self) -> DbResult<i64>;

    /// One page of orders, newest first
    async fn list_page(&self, offset: i64, limit: i64) -> DbResult<Vec<OrderRow>>;

    /// Number of orders matching a text predicate
    async fn count_matching(&self, text: &TextMatch) -> DbResult<i64>;

    /// Orders matching a text predicate, newest first
    async fn search(&self, text: &TextMatch, limit: i64) -> DbResult<Vec<OrderRow>>;

    /// Full-text search over the company details column, most relevant first
    async fn full_text_search(&self, query: &str, limit: i64) -> DbResult<Vec<OrderRow>>;

    /// Set the payment status; `None` when the order does not exist
    async fn update_payment_status(&self, id: Uuid, status: &str) -> DbResult<Option<OrderRow>>;

    /// Count-only query used by the statistics dashboard
    async fn count_for_statistics(&self, which: OrderCount, window: &DateWindow)
        -> DbResult<i64>;
}

/// Profile repository trait
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profiles for the given user ids (missing ids are skipped)
    async fn find_by_ids(&self, ids: &[Uuid]) -> DbResult<Vec<ProfileRow>>;

    /// Profiles whose first name, last name or email contains the needle
    async fn search(&self, needle: &str) -> DbResult<Vec<ProfileRow>>;

    /// Number of profiles created inside the window
    async fn count_created(&self, window: &DateWindow) -> DbResult<i64>;
}

/// Invoice repository trait
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Find the invoice of an order
    async fn find_by_order_id(&self, order_id: Uuid) -> DbResult<Option<InvoiceRow>>;

    /// Insert an invoice, or return the existing one when the order already has one
    async fn create_or_get(&self, invoice: CreateInvoice) -> DbResult<InvoiceRow>;
}

/// Create invoice input
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Option<Uuid>,
    pub invoice_number: String,
    pub invoice_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub subtotal_cents: i64,
    pub vat_rate: i32,
    pub vat_amount_cents: i64,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub company_name: Option<String>,
    pub company_registry_code: Option<String>,
    pub company_address: Option<String>,
    pub bill_to: String,
    pub bill_to_address: Option<String>,
    pub service_description: String,
    pub order_reference: String,
    pub orderer_first_name: Option<String>,
    pub orderer_last_name: Option<String>,
    pub orderer_email: Option<String>,
    pub orderer_company: Option<String>,
}
