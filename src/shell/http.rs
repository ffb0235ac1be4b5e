// Purpose: route table for the HTTP and WebSocket surface.

use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::stats::inbound::http as stats_http;
use crate::modules::time_entries::inbound::http as entries_http;
use crate::shared::infrastructure::realtime::ws;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/time-entries/start", post(entries_http::start))
        .route("/time-entries/{id}/stop", patch(entries_http::stop))
        .route("/time-entries/running", get(entries_http::running))
        .route("/time-entries", get(entries_http::list))
        .route(
            "/time-entries/{id}",
            put(entries_http::update).delete(entries_http::remove),
        )
        .route("/stats/daily", get(stats_http::daily))
        .route("/stats/weekly", get(stats_http::weekly))
        .route("/stats/monthly", get(stats_http::monthly))
        .route("/hubs/timer", get(ws::handle))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
