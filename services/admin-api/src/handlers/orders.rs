//! Order handlers

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use tracing::instrument;
use uuid::Uuid;

use orderdesk_types::api::{
    MessageResponse, OrderSearchResponse, PageParams, PageResponse, PaymentStatusRequest,
    PaymentStatusResponse, SearchParams,
};
use orderdesk_types::{Order, OrderId};

use super::shared::{record_op_duration, ORDERS_PAGE_SIZE};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// GET /api/orders
#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<PageResponse<Order>>> {
    let start = Instant::now();

    let result = state
        .orders
        .list(
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(ORDERS_PAGE_SIZE),
        )
        .await;

    record_op_duration("list_orders", start, result.is_ok());
    Ok(Json(result?))
}

/// GET /api/orders/search
#[instrument(skip(state))]
pub async fn search_orders(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<OrderSearchResponse>> {
    let start = Instant::now();

    let result = state
        .orders
        .search(params.query.as_deref().unwrap_or_default())
        .await;

    record_op_duration("search_orders", start, result.is_ok());
    Ok(Json(result?))
}

/// PATCH /api/orders/{id}/payment-status
#[instrument(skip(state, body), fields(order_id = %id))]
pub async fn update_payment_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<PaymentStatusRequest>,
) -> ApiResult<Json<PaymentStatusResponse>> {
    let start = Instant::now();

    let result = state
        .orders
        .set_payment_status(OrderId(id), body.status.as_deref().unwrap_or_default())
        .await;

    record_op_duration("update_payment_status", start, result.is_ok());
    let order = result?;

    metrics::counter!(
        "orderdesk_payment_status_updates_total",
        "status" => order.payment_status.as_str()
    )
    .increment(1);

    Ok(Json(PaymentStatusResponse {
        message: "Payment status updated successfully".to_string(),
        data: order,
    }))
}

/// POST /api/orders/{id}/full-analysis
#[instrument(skip(state), fields(order_id = %id))]
pub async fn start_full_analysis(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let start = Instant::now();

    let result = state.orders.start_full_analysis(OrderId(id)).await;

    record_op_duration("start_full_analysis", start, result.is_ok());
    result?;

    Ok(Json(MessageResponse {
        message: "Full analysis started".to_string(),
    }))
}
