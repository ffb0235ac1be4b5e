// Purpose: HTTP surface for the timer lifecycle and entry queries.
// Responsibilities: decode camelCase payloads, dispatch to the use case
// handlers, and translate domain errors into status codes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::modules::time_entries::core::entry::EntryPatch;
use crate::modules::time_entries::use_cases::delete_entry::DeleteEntry;
use crate::modules::time_entries::use_cases::errors::TimerError;
use crate::modules::time_entries::use_cases::list_entries::{EntryWithTask, ListEntries};
use crate::modules::time_entries::use_cases::start_timer::StartTimer;
use crate::modules::time_entries::use_cases::stop_timer::StopTimer;
use crate::modules::time_entries::use_cases::update_entry::UpdateEntry;
use crate::shell::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerBody {
    pub task_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerResponse {
    pub id: Uuid,
    pub task_id: Uuid,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTimerResponse {
    pub id: Uuid,
    pub end_time: DateTime<Utc>,
    pub duration: i64,
}

/// Distinguishes `"endTime": null` (clear the field) from an absent key
/// (leave it alone).
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DateTime<Utc>>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryBody {
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_time: Option<Option<DateTime<Utc>>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub user_id: Uuid,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParam {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub id: Uuid,
    pub title: String,
    pub color: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryResponse {
    pub id: Uuid,
    pub task_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub task: TaskInfo,
}

impl From<EntryWithTask> for TimeEntryResponse {
    fn from(row: EntryWithTask) -> Self {
        Self {
            id: row.entry.id,
            task_id: row.entry.task_id,
            start_time: row.entry.start_time,
            end_time: row.entry.end_time,
            notes: row.entry.notes,
            task: TaskInfo {
                id: row.task.id,
                title: row.task.title,
                color: row.task.color,
                status: row.task.status,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedEntryResponse {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_response(error: TimerError) -> Response {
    use crate::modules::time_entries::core::ports::StoreError;

    let status = match &error {
        TimerError::TaskNotFound(_) => StatusCode::NOT_FOUND,
        TimerError::Forbidden(_) => StatusCode::FORBIDDEN,
        TimerError::Store(StoreError::EntryNotFound(_)) => StatusCode::NOT_FOUND,
        TimerError::Store(StoreError::RunningTimerExists { .. })
        | TimerError::Store(StoreError::AlreadyStopped(_)) => StatusCode::CONFLICT,
        TimerError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub async fn start(
    State(state): State<AppState>,
    body: Result<Json<StartTimerBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    match state
        .start_timer
        .handle(StartTimer {
            task_id: body.task_id,
            user_id: body.user_id,
        })
        .await
    {
        Ok(started) => (
            StatusCode::CREATED,
            Json(StartTimerResponse {
                id: started.id,
                task_id: started.task_id,
                start_time: started.start_time,
            }),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn stop(State(state): State<AppState>, Path(entry_id): Path<Uuid>) -> Response {
    match state.stop_timer.handle(StopTimer { entry_id }).await {
        Ok(stopped) => Json(StopTimerResponse {
            id: stopped.id,
            end_time: stopped.end_time,
            duration: stopped.duration.num_seconds(),
        })
        .into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    match state
        .list_entries
        .handle(ListEntries {
            user_id: params.user_id,
            date: params.date,
            start_date: params.start_date,
            end_date: params.end_date,
        })
        .await
    {
        Ok(rows) => Json(
            rows.into_iter()
                .map(TimeEntryResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn running(State(state): State<AppState>, Query(params): Query<UserParam>) -> Response {
    match state.list_entries.running_today(params.user_id).await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(TimeEntryResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    body: Result<Json<UpdateEntryBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    match state
        .update_entry
        .handle(UpdateEntry {
            entry_id,
            patch: EntryPatch {
                start_time: body.start_time,
                end_time: body.end_time,
                notes: body.notes,
            },
        })
        .await
    {
        Ok(entry) => Json(UpdatedEntryResponse {
            id: entry.id,
            start_time: entry.start_time,
            end_time: entry.end_time,
            notes: entry.notes,
        })
        .into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn remove(State(state): State<AppState>, Path(entry_id): Path<Uuid>) -> Response {
    match state.delete_entry.handle(DeleteEntry { entry_id }).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}
