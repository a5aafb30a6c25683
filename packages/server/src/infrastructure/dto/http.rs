//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Live state of one timer room, as exposed by the debug endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub code: String,
    pub owner: String,
    pub running: bool,
    pub participants: Vec<String>,
    /// RFC 3339
    pub created_at: String,
}
