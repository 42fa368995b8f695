//! Admin API request/response bodies
//!
//! Shared by the HTTP service (serialization) and the client SDK
//! (deserialization). Request fields the server validates itself are kept
//! optional so a missing value yields a `400` with a readable message.

use serde::{Deserialize, Serialize};

use crate::{AdminUser, Order, Pagination, UserId};

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// `page` / `pageSize` query parameters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// `query` parameter of the search endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// One page of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Result of `GET /api/orders/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSearchResponse {
    pub data: Vec<Order>,
    pub total_count: u64,
    pub full_text_search_used: bool,
}

/// Result of `GET /api/users/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchResponse {
    pub data: Vec<AdminUser>,
    pub total_count: u64,
    pub query: String,
}

/// Body of `PATCH /api/orders/{id}/payment-status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub message: String,
    pub data: Order,
}

/// Generic acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `PATCH /api/users/{id}/change-password`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: Option<String>,
}

/// Never carries the new credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordResponse {
    pub message: String,
    pub user_id: UserId,
}

/// Body of `POST /api/users/{id}/generate-magic-link`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MagicLinkRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicLinkResponse {
    pub magic_link: String,
    pub user: MagicLinkUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicLinkUser {
    pub id: UserId,
    pub email: String,
}

/// Query parameters of `GET /api/statistics`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsParams {
    pub period: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Body of `POST /api/create-invoice`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub order_id: Option<String>,
    pub customer_name: Option<String>,
    pub company_name: Option<String>,
}

/// Body of `POST /api/generate-invoice-pdf`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderInvoiceRequest {
    pub id: Option<String>,
}
