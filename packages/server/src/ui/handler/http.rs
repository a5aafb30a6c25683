//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{RoomError, TimerCode},
    infrastructure::dto::http::RoomSummaryDto,
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint listing live timer rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Debug endpoint for a single timer room
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<RoomSummaryDto>, StatusCode> {
    let code = TimerCode::new(&code).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.get_room_detail_usecase.execute(&code).await {
        Ok(room) => Ok(Json(RoomSummaryDto::from(&room))),
        Err(RoomError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Unexpected error while reading timer {}: {}", code, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
