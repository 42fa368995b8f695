//! PostgreSQL invoice repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::InvoiceRow;
use crate::repo::{CreateInvoice, InvoiceRepository};

const INVOICE_COLUMNS: &str = "id, order_id, user_id, invoice_number, invoice_date, due_date, \
     subtotal_cents, vat_rate, vat_amount_cents, amount_cents, currency, status, \
     customer_name, customer_email, company_name, company_registry_code, company_address, \
     bill_to, bill_to_address, service_description, order_reference, \
     orderer_first_name, orderer_last_name, orderer_email, orderer_company, created_at";

/// PostgreSQL invoice repository
#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    /// Create a new invoice repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn find_by_order_id(&self, order_id: Uuid) -> DbResult<Option<InvoiceRow>> {
        let sql = format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE order_id = $1");

        let invoice = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    async fn create_or_get(&self, invoice: CreateInvoice) -> DbResult<InvoiceRow> {
        // Concurrent creators for one order race on the unique order_id;
        // the loser reads back the winner's row.
        let sql = format!(
            r#"
            INSERT INTO invoices (
                id, order_id, user_id, invoice_number, invoice_date, due_date,
                subtotal_cents, vat_rate, vat_amount_cents, amount_cents, currency, status,
                customer_name, customer_email, company_name, company_registry_code,
                company_address, bill_to, bill_to_address, service_description, order_reference,
                orderer_first_name, orderer_last_name, orderer_email, orderer_company
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
            ON CONFLICT (order_id) DO NOTHING
            RETURNING {INVOICE_COLUMNS}
            "#
        );

        let inserted = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(invoice.id)
            .bind(invoice.order_id)
            .bind(invoice.user_id)
            .bind(&invoice.invoice_number)
            .bind(invoice.invoice_date)
            .bind(invoice.due_date)
            .bind(invoice.subtotal_cents)
            .bind(invoice.vat_rate)
            .bind(invoice.vat_amount_cents)
            .bind(invoice.amount_cents)
            .bind(&invoice.currency)
            .bind(&invoice.status)
            .bind(&invoice.customer_name)
            .bind(&invoice.customer_email)
            .bind(&invoice.company_name)
            .bind(&invoice.company_registry_code)
            .bind(&invoice.company_address)
            .bind(&invoice.bill_to)
            .bind(&invoice.bill_to_address)
            .bind(&invoice.service_description)
            .bind(&invoice.order_reference)
            .bind(&invoice.orderer_first_name)
            .bind(&invoice.orderer_last_name)
            .bind(&invoice.orderer_email)
            .bind(&invoice.orderer_company)
            .fetch_optional(&self.pool)
            .await?;

        match inserted {
            Some(row) => Ok(row),
            None => {
                debug!(order_id = %invoice.order_id, "invoice already exists for order");
                self.find_by_order_id(invoice.order_id)
                    .await?
                    .ok_or(DbError::NotFound)
            }
        }
    }
}
