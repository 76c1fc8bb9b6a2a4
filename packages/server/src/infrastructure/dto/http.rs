//! HTTP-facing DTOs.

use serde::{Deserialize, Serialize};

/// Form payload posted by the nginx-rtmp publish/unpublish hooks
#[derive(Debug, Deserialize)]
pub struct RtmpCallback {
    /// Stream key ("name" in the nginx-rtmp callback)
    #[serde(default)]
    pub name: String,
    /// RTMP application name
    #[serde(default)]
    pub app: String,
}

/// Occupancy summary for one active chat room
#[derive(Debug, Serialize)]
pub struct RoomSummaryDto {
    pub stream_key: String,
    pub connections: usize,
}
