//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub overlays: usize,
    pub controllers: usize,
    /// Seconds since process start
    pub uptime: f64,
}
