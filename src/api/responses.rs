//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// API response structure for timer action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
    pub display: String,
    pub label: String,
}

impl ApiResponse {
    /// Create a response describing the timer after an action
    pub fn new(message: String, timer: TimerState) -> Self {
        let status = if timer.is_running { "running" } else { "paused" };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            display: timer.display(),
            label: timer.phase_label().to_string(),
            timer,
        }
    }
}

/// Status response with timer view and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub display: String,
    pub label: String,
    pub completed_work_sessions: u64,
    pub driver_armed: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Error body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
