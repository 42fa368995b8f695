//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use orderdesk_types::{Invoice, InvoiceId, Order, OrderId, Profile, UserId};

use crate::DbError;

/// Order row from the database
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub company_name: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub payment_status: String,
    pub quick_status: Option<String>,
    pub full_status: Option<String>,
    pub total_cost_cents: i64,
    pub user_id: Option<Uuid>,
    pub company_registry_code: Option<String>,
    pub company_address: Option<String>,
    pub bill_to: Option<String>,
    pub bill_to_address: Option<String>,
}

/// Profile row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Invoice row from the database
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceRow {
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
    pub created_at: DateTime<Utc>,
}

// Conversions from row types to domain types

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let payment_status = row
            .payment_status
            .parse()
            .map_err(|e| DbError::CorruptRow(format!("order {}: {e}", row.id)))?;

        Ok(Self {
            id: OrderId(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            company: row.company,
            company_name: row.company_name,
            contact_email: row.contact_email,
            created_at: row.created_at,
            payment_status,
            quick_status: row.quick_status,
            full_status: row.full_status,
            total_cost_cents: row.total_cost_cents,
            user_id: row.user_id.map(UserId),
            company_registry_code: row.company_registry_code,
            company_address: row.company_address,
            bill_to: row.bill_to,
            bill_to_address: row.bill_to_address,
        })
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: row.created_at,
        }
    }
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Self {
            id: InvoiceId(row.id),
            order_id: OrderId(row.order_id),
            user_id: row.user_id.map(UserId),
            invoice_number: row.invoice_number,
            invoice_date: row.invoice_date,
            due_date: row.due_date,
            subtotal_cents: row.subtotal_cents,
            vat_rate: row.vat_rate,
            vat_amount_cents: row.vat_amount_cents,
            amount_cents: row.amount_cents,
            currency: row.currency,
            status: row.status,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            company_name: row.company_name,
            company_registry_code: row.company_registry_code,
            company_address: row.company_address,
            bill_to: row.bill_to,
            bill_to_address: row.bill_to_address,
            service_description: row.service_description,
            order_reference: row.order_reference,
            orderer_first_name: row.orderer_first_name,
            orderer_last_name: row.orderer_last_name,
            orderer_email: row.orderer_email,
            orderer_company: row.orderer_company,
            created_at: row.created_at,
        }
    }
}

/// Collapse a row count from the database into a domain count
pub fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
