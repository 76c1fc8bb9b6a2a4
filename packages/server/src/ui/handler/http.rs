//! HTTP handlers: health, RTMP hooks and room occupancy.

use std::sync::Arc;

use axum::{Form, Json, extract::State, http::StatusCode};

use crate::{
    domain::StreamKey,
    infrastructure::dto::http::{RoomSummaryDto, RtmpCallback},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /api/rtmp/publish` - called by nginx-rtmp when a streamer starts
/// publishing. Refuses unknown or missing stream keys with 403 so nginx
/// drops the publish attempt.
pub async fn rtmp_publish(
    State(state): State<Arc<AppState>>,
    Form(callback): Form<RtmpCallback>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    tracing::info!(
        "RTMP publish request: name='{}', app='{}'",
        callback.name,
        callback.app
    );

    if callback.name.is_empty() {
        tracing::warn!("RTMP publish without a stream key");
        return Err((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({"detail": "Stream key required"})),
        ));
    }

    let stream_key = StreamKey::new(callback.name);
    if !state.directory.mark_live(&stream_key).await {
        tracing::warn!("Invalid stream key for publish: '{}'", stream_key.as_str());
        return Err((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({"detail": "Invalid stream key"})),
        ));
    }

    tracing::info!("Stream '{}' is now live", stream_key.as_str());
    Ok(Json(serde_json::json!({"status": "ok"})))
}

/// `POST /api/rtmp/unpublish` - called by nginx-rtmp when a streamer stops.
/// Never blocks the unpublish, even for unknown keys.
pub async fn rtmp_unpublish(
    State(state): State<Arc<AppState>>,
    Form(callback): Form<RtmpCallback>,
) -> Json<serde_json::Value> {
    tracing::info!(
        "RTMP unpublish request: name='{}', app='{}'",
        callback.name,
        callback.app
    );

    if callback.name.is_empty() {
        tracing::warn!("RTMP unpublish without a stream key");
        return Json(serde_json::json!({"status": "ok"}));
    }

    let stream_key = StreamKey::new(callback.name);
    if state.directory.mark_offline(&stream_key).await {
        tracing::info!("Stream '{}' went offline", stream_key.as_str());
    } else {
        tracing::warn!(
            "Invalid stream key for unpublish: '{}'",
            stream_key.as_str()
        );
    }

    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint: occupancy of the currently active chat rooms
pub async fn get_chat_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.hub.rooms_snapshot().await;

    Json(
        rooms
            .into_iter()
            .map(|(stream_key, connections)| RoomSummaryDto {
                stream_key: stream_key.into_string(),
                connections,
            })
            .collect(),
    )
}
