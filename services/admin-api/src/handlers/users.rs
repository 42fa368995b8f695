//! User handlers

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use tracing::instrument;
use uuid::Uuid;

use orderdesk_types::api::{
    ChangePasswordRequest, ChangePasswordResponse, MagicLinkRequest, MagicLinkResponse,
    PageParams, PageResponse, SearchParams, UserSearchResponse,
};
use orderdesk_types::{AdminUser, UserId};

use super::shared::{record_op_duration, USERS_PAGE_SIZE};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// GET /api/users
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<PageResponse<AdminUser>>> {
    let start = Instant::now();

    let result = state
        .users
        .list(
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(USERS_PAGE_SIZE),
        )
        .await;

    record_op_duration("list_users", start, result.is_ok());
    Ok(Json(result?))
}

/// GET /api/users/search
#[instrument(skip(state))]
pub async fn search_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<UserSearchResponse>> {
    let start = Instant::now();

    let result = state
        .users
        .search(params.query.as_deref().unwrap_or_default())
        .await;

    record_op_duration("search_users", start, result.is_ok());
    Ok(Json(result?))
}

/// PATCH /api/users/{id}/change-password
#[instrument(skip(state, body), fields(user_id = %id))]
pub async fn change_password(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<ChangePasswordRequest>,
) -> ApiResult<Json<ChangePasswordResponse>> {
    let start = Instant::now();

    let result = state
        .users
        .reset_password(UserId(id), body.password.as_deref())
        .await;

    record_op_duration("change_password", start, result.is_ok());
    Ok(Json(result?))
}

/// POST /api/users/{id}/generate-magic-link
#[instrument(skip(state, body), fields(user_id = %id))]
pub async fn generate_magic_link(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<MagicLinkRequest>,
) -> ApiResult<Json<MagicLinkResponse>> {
    let start = Instant::now();

    let result = state
        .users
        .issue_magic_link(UserId(id), body.email.as_deref())
        .await;

    record_op_duration("generate_magic_link", start, result.is_ok());
    Ok(Json(result?))
}
