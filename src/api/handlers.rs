//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    state::{AppState, TimerAction},
};
use super::responses::{ApiResponse, ErrorResponse, HealthResponse, StatusResponse};

fn action_response(
    state: &Arc<AppState>,
    action: TimerAction,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(action) {
        Ok(timer) => {
            info!("{} endpoint called - {}", action.as_str(), timer.display());
            Ok(Json(ApiResponse::new(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to dispatch {}: {}", action.as_str(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    action_response(&state, TimerAction::Start, "Timer started")
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    action_response(&state, TimerAction::Pause, "Timer paused")
}

/// Handle POST /reset - Stop and reload the current session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    action_response(&state, TimerAction::Reset, "Timer reset")
}

/// Handle POST /tick - Manually decrement by one second
pub async fn tick_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    action_response(&state, TimerAction::Tick, "Timer ticked")
}

/// Handle POST /toggle - Pause if running, start otherwise
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle() {
        Ok(timer) => {
            let message = if timer.is_running { "Timer started" } else { "Timer paused" };
            info!("toggle endpoint called - {}", message);
            Ok(Json(ApiResponse::new(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /action/:name - Dispatch an action by name
pub async fn named_action_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let action = match name.parse::<TimerAction>() {
        Ok(action) => action,
        Err(e @ TimerError::UnknownAction(_)) => {
            warn!("Rejected action: {}", e);
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))).into_response();
        }
        Err(e) => {
            error!("Failed to parse action: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let message = format!("Dispatched {}", action.as_str());
    action_response(&state, action, &message).into_response()
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let driver_armed = match state.driver_armed() {
        Ok(armed) => armed,
        Err(e) => {
            error!("Failed to inspect countdown driver: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display: timer.display(),
        label: timer.phase_label().to_string(),
        timer,
        completed_work_sessions: state.completed_work_sessions(),
        driver_armed,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
