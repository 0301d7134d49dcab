//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::HealthDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let report = state.get_health_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(HealthDto {
        status: "ok".to_string(),
        overlays: report.overlays,
        controllers: report.controllers,
        uptime: report.uptime_secs,
    })
}
