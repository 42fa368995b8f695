//! Statistics handler

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use tracing::instrument;

use orderdesk_core::window_selector;
use orderdesk_types::api::StatisticsParams;
use orderdesk_types::StatisticsSnapshot;

use super::shared::record_op_duration;
use crate::error::ApiResult;
use crate::extractors::ApiQuery;
use crate::state::AppState;

/// GET /api/statistics
#[instrument(skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<StatisticsParams>,
) -> ApiResult<Json<StatisticsSnapshot>> {
    let selector = window_selector(
        params.period.as_deref(),
        params.from.as_deref(),
        params.to.as_deref(),
    )?;

    let start = Instant::now();
    let result = state.statistics.compute(selector).await;

    record_op_duration("statistics", start, result.is_ok());
    Ok(Json(result?))
}
