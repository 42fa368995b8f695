//! Invoice resolution and PDF rendering
//!
//! Each order has at most one invoice. Resolving returns the stored invoice
//! when one exists and otherwise creates it from a snapshot of the order;
//! the `UNIQUE(order_id)` constraint settles concurrent creators.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

use orderdesk_db::{CreateInvoice, InvoiceRepository, OrderRepository};
use orderdesk_types::{Invoice, InvoiceId, Order, OrderId};

use crate::config::InvoicePricing;
use crate::provider::InvoiceRenderer;
use crate::CoreError;

/// Billing target used when the order does not name one
pub const DEFAULT_BILL_TO: &str = "private";

/// Caller-supplied replacements for snapshot fields
#[derive(Debug, Clone, Default)]
pub struct InvoiceOverrides {
    pub customer_name: Option<String>,
    pub company_name: Option<String>,
}

/// A rendered invoice ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Invoice contents computed from an order, before it is stored
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub id: InvoiceId,
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
    pub company_name: Option<String>,
    pub bill_to: String,
    pub service_description: String,
    pub order_reference: String,
}

impl InvoiceDraft {
    /// Compute the invoice for an order as of `now`
    pub fn compute(
        order: &Order,
        overrides: &InvoiceOverrides,
        pricing: &InvoicePricing,
        now: DateTime<Utc>,
    ) -> Self {
        let customer_name = non_blank(overrides.customer_name.as_deref())
            .unwrap_or_else(|| order.customer_name());
        let company_name = non_blank(overrides.company_name.as_deref())
            .or_else(|| non_blank(order.company.as_deref()))
            .or_else(|| non_blank(order.company_name.as_deref()));

        Self {
            id: InvoiceId::new(),
            invoice_number: format!("INV-{}", now.timestamp()),
            invoice_date: now,
            due_date: now + Duration::days(pricing.payment_terms_days),
            subtotal_cents: pricing.subtotal_cents,
            vat_rate: pricing.vat_rate,
            vat_amount_cents: pricing.vat_amount_cents(),
            amount_cents: pricing.total_cents(),
            currency: pricing.currency.clone(),
            status: order.payment_status.to_string(),
            customer_name,
            company_name,
            bill_to: non_blank(order.bill_to.as_deref())
                .unwrap_or_else(|| DEFAULT_BILL_TO.to_string()),
            service_description: pricing.service_description.clone(),
            order_reference: format!("ORD-{}", order.id.short()),
        }
    }

    /// Storage input for this draft
    pub fn into_create(self, order: &Order) -> CreateInvoice {
        CreateInvoice {
            id: self.id.0,
            order_id: order.id.0,
            user_id: order.user_id.map(|u| u.0),
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            subtotal_cents: self.subtotal_cents,
            vat_rate: self.vat_rate,
            vat_amount_cents: self.vat_amount_cents,
            amount_cents: self.amount_cents,
            currency: self.currency,
            status: self.status,
            customer_name: self.customer_name,
            customer_email: order.contact_email.clone(),
            company_name: self.company_name,
            company_registry_code: order.company_registry_code.clone(),
            company_address: order.company_address.clone(),
            bill_to: self.bill_to,
            bill_to_address: order.bill_to_address.clone(),
            service_description: self.service_description,
            order_reference: self.order_reference,
            orderer_first_name: order.first_name.clone(),
            orderer_last_name: order.last_name.clone(),
            orderer_email: order.contact_email.clone(),
            orderer_company: order.company.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Invoice service
pub struct InvoiceService<O: OrderRepository, I: InvoiceRepository> {
    orders: Arc<O>,
    invoices: Arc<I>,
    renderer: Arc<dyn InvoiceRenderer>,
    pricing: InvoicePricing,
}

impl<O: OrderRepository, I: InvoiceRepository> InvoiceService<O, I> {
    /// Create a new invoice service
    pub fn new(
        orders: Arc<O>,
        invoices: Arc<I>,
        renderer: Arc<dyn InvoiceRenderer>,
        pricing: InvoicePricing,
    ) -> Self {
        Self {
            orders,
            invoices,
            renderer,
            pricing,
        }
    }

    /// The order's invoice, created on first request
    #[instrument(skip(self, overrides))]
    pub async fn resolve(
        &self,
        order_id: OrderId,
        overrides: InvoiceOverrides,
    ) -> Result<Invoice, CoreError> {
        if let Some(existing) = self.invoices.find_by_order_id(order_id.0).await? {
            return Ok(existing.into());
        }

        let row = self
            .orders
            .find_by_id(order_id.0)
            .await?
            .ok_or_else(|| CoreError::NotFound("Order not found".to_string()))?;
        let order = Order::try_from(row)?;

        let draft = InvoiceDraft::compute(&order, &overrides, &self.pricing, Utc::now());
        let draft_id = draft.id;
        let stored: Invoice = self
            .invoices
            .create_or_get(draft.into_create(&order))
            .await?
            .into();

        if stored.id == draft_id {
            info!(invoice_id = %stored.id, invoice_number = %stored.invoice_number, "Invoice created");
            metrics::counter!("orderdesk_invoices_created_total").increment(1);
        }

        Ok(stored)
    }

    /// Render a stored invoice through the PDF renderer
    #[instrument(skip(self))]
    pub async fn render_pdf(&self, invoice_id: InvoiceId) -> Result<RenderedPdf, CoreError> {
        let bytes = self.renderer.render(&invoice_id).await?;

        Ok(RenderedPdf {
            filename: invoice_id.pdf_filename(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use orderdesk_types::PaymentStatus;
    use uuid::Uuid;

    fn order() -> Order {
        Order {
            id: OrderId(Uuid::parse_str("1b4e28ba-2fa1-11d2-883f-0016d3cca427").unwrap()),
            first_name: Some("Mari".to_string()),
            last_name: Some("Maasikas".to_string()),
            company: None,
            company_name: Some("Maasikas OÜ".to_string()),
            contact_email: Some("mari@example.com".to_string()),
            created_at: Utc::now(),
            payment_status: PaymentStatus::Paid,
            quick_status: None,
            full_status: None,
            total_cost_cents: 2000,
            user_id: None,
            company_registry_code: Some("12345678".to_string()),
            company_address: None,
            bill_to: None,
            bill_to_address: None,
        }
    }

    #[test]
    fn test_draft_amounts_and_dates() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let draft = InvoiceDraft::compute(
            &order(),
            &InvoiceOverrides::default(),
            &InvoicePricing::default(),
            now,
        );

        assert_eq!(draft.subtotal_cents, 2000);
        assert_eq!(draft.vat_rate, 20);
        assert_eq!(draft.vat_amount_cents, 400);
        assert_eq!(draft.amount_cents, 2400);
        assert_eq!(draft.currency, "EUR");
        assert_eq!(draft.due_date - draft.invoice_date, Duration::days(14));
        assert_eq!(draft.invoice_number, format!("INV-{}", now.timestamp()));
        assert_eq!(draft.order_reference, "ORD-1b4e28ba");
        assert_eq!(draft.status, "paid");
        assert_eq!(draft.bill_to, DEFAULT_BILL_TO);
    }

    #[test]
    fn test_draft_snapshot_fields() {
        let draft = InvoiceDraft::compute(
            &order(),
            &InvoiceOverrides::default(),
            &InvoicePricing::default(),
            Utc::now(),
        );
        assert_eq!(draft.customer_name, "Mari Maasikas");
        assert_eq!(draft.company_name.as_deref(), Some("Maasikas OÜ"));

        let mut with_company = order();
        with_company.company = Some("Brand Name".to_string());
        let overrides = InvoiceOverrides {
            customer_name: Some("Accounts Payable".to_string()),
            company_name: Some("  ".to_string()),
        };
        let draft = InvoiceDraft::compute(
            &with_company,
            &overrides,
            &InvoicePricing::default(),
            Utc::now(),
        );
        assert_eq!(draft.customer_name, "Accounts Payable");
        assert_eq!(draft.company_name.as_deref(), Some("Brand Name"));
    }
}
