//! HTTP Request/Response Types

use serde::{Deserialize, Serialize};

/// Decoded `key=value` pairs of a query string or form body.
///
/// Kept as a sequence so a repeated key is not a decode error; the last
/// occurrence wins.
pub type FieldPairs = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub queue_backend: String,
    pub uptime_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
