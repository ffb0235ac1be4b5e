// Purpose: HTTP surface for the statistics endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::stats::use_cases::StatsError;
use crate::modules::time_entries::inbound::http::ErrorBody;
use crate::shell::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyParams {
    pub user_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyParams {
    pub user_id: Uuid,
    pub start_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyParams {
    pub user_id: Uuid,
    pub year: i32,
    pub month: u32,
}

fn error_response(error: StatsError) -> Response {
    let status = match &error {
        StatsError::InvalidWindow(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StatsError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub async fn daily(State(state): State<AppState>, Query(params): Query<DailyParams>) -> Response {
    match state.stats.daily(params.user_id, params.date).await {
        Ok(stats) => Json(stats).into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn weekly(State(state): State<AppState>, Query(params): Query<WeeklyParams>) -> Response {
    match state.stats.weekly(params.user_id, params.start_date).await {
        Ok(stats) => Json(stats).into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn monthly(
    State(state): State<AppState>,
    Query(params): Query<MonthlyParams>,
) -> Response {
    match state
        .stats
        .monthly(params.user_id, params.year, params.month)
        .await
    {
        Ok(stats) => Json(stats).into_response(),
        Err(error) => error_response(error),
    }
}
