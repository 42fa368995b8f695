//! Invoice handlers

use std::time::Instant;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::instrument;

use orderdesk_core::InvoiceOverrides;
use orderdesk_types::api::{CreateInvoiceRequest, RenderInvoiceRequest};
use orderdesk_types::{Invoice, InvoiceId, OrderId};

use super::shared::{record_op_duration, required_id};
use crate::error::ApiResult;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /api/create-invoice
///
/// Returns the order's existing invoice, or creates it.
#[instrument(skip(state, body), fields(order_id))]
pub async fn create_invoice(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateInvoiceRequest>,
) -> ApiResult<Json<Invoice>> {
    let order_id = OrderId(required_id(body.order_id.as_deref(), "Order ID")?);
    tracing::Span::current().record("order_id", tracing::field::display(order_id));

    let overrides = InvoiceOverrides {
        customer_name: body.customer_name,
        company_name: body.company_name,
    };

    let start = Instant::now();
    let result = state.invoices.resolve(order_id, overrides).await;

    record_op_duration("create_invoice", start, result.is_ok());
    Ok(Json(result?))
}

/// POST /api/generate-invoice-pdf
#[instrument(skip(state, body), fields(invoice_id))]
pub async fn generate_invoice_pdf(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RenderInvoiceRequest>,
) -> ApiResult<Response> {
    let invoice_id = InvoiceId(required_id(body.id.as_deref(), "Invoice ID")?);
    tracing::Span::current().record("invoice_id", tracing::field::display(invoice_id));

    let start = Instant::now();
    let result = state.invoices.render_pdf(invoice_id).await;

    record_op_duration("generate_invoice_pdf", start, result.is_ok());
    let pdf = result?;

    let disposition = format!("attachment; filename=\"{}\"", pdf.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf.bytes,
    )
        .into_response())
}
