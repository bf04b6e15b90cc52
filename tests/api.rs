use std::{sync::Arc, time::Duration};

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use pomodoro_server::{
    api::responses::{ApiResponse, ErrorResponse, HealthResponse, StatusResponse},
    create_router, AppState, SessionType, TimerState,
};
use tower::ServiceExt;

fn test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        20525,
        "127.0.0.1".to_string(),
        Duration::from_secs(1),
    ));
    (create_router(Arc::clone(&state)), state)
}

async fn post(app: &Router, path: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::post(path).body(Body::empty()).expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

async fn get(app: &Router, path: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::get(path).body(Body::empty()).expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _state) = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn status_reports_initial_work_session() {
    let (app, _state) = test_app();
    let (status, body) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::OK);

    let dto: StatusResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(dto.timer, TimerState::new());
    assert_eq!(dto.display, "00:25");
    assert_eq!(dto.label, "Work Session");
    assert_eq!(dto.completed_work_sessions, 0);
    assert!(!dto.driver_armed);
    assert_eq!(dto.last_action, None);
}

#[tokio::test]
async fn status_uses_camel_case_timer_fields() {
    let (app, _state) = test_app();
    let (_, body) = get(&app, "/status").await;

    let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(value["timer"]["isRunning"], false);
    assert_eq!(value["timer"]["sessionType"], "work");
}

#[tokio::test(start_paused = true)]
async fn start_then_pause_round_trip() {
    let (app, state) = test_app();

    let (status, body) = post(&app, "/start").await;
    assert_eq!(status, StatusCode::OK);
    let started: ApiResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(started.status, "running");
    assert!(started.timer.is_running);
    assert!(state.driver_armed().unwrap());

    let (status, body) = post(&app, "/pause").await;
    assert_eq!(status, StatusCode::OK);
    let paused: ApiResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(paused.status, "paused");
    assert!(!state.driver_armed().unwrap());

    let (_, body) = get(&app, "/status").await;
    let dto: StatusResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(dto.last_action.as_deref(), Some("pause"));
}

#[tokio::test(start_paused = true)]
async fn driver_advances_status_while_running() {
    let (app, _state) = test_app();
    post(&app, "/start").await;

    tokio::time::sleep(Duration::from_millis(3500)).await;
    post(&app, "/pause").await;
    tokio::time::sleep(Duration::from_secs(3)).await;

    let (_, body) = get(&app, "/status").await;
    let dto: StatusResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(dto.display, "00:22");
    assert!(!dto.timer.is_running);
}

#[tokio::test]
async fn manual_ticks_flip_into_break() {
    let (app, _state) = test_app();
    for _ in 0..26 {
        let (status, _) = post(&app, "/tick").await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = get(&app, "/status").await;
    let dto: StatusResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(dto.timer.session_type, SessionType::Break);
    assert_eq!(dto.display, "00:05");
    assert_eq!(dto.label, "Break Session");
    assert_eq!(dto.completed_work_sessions, 1);
}

#[tokio::test]
async fn reset_reloads_break_allotment() {
    let (app, _state) = test_app();
    for _ in 0..28 {
        post(&app, "/tick").await;
    }

    let (_, body) = post(&app, "/reset").await;
    let reset: ApiResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(reset.timer.session_type, SessionType::Break);
    assert_eq!(reset.display, "00:05");
    assert!(!reset.timer.is_running);
}

#[tokio::test(start_paused = true)]
async fn toggle_flips_running() {
    let (app, _state) = test_app();

    let (_, body) = post(&app, "/toggle").await;
    let first: ApiResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(first.status, "running");

    let (_, body) = post(&app, "/toggle").await;
    let second: ApiResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(second.status, "paused");
}

#[tokio::test]
async fn named_action_dispatches_known_names() {
    let (app, _state) = test_app();
    let (status, body) = post(&app, "/action/tick").await;
    assert_eq!(status, StatusCode::OK);

    let ticked: ApiResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(ticked.display, "00:24");
}

#[tokio::test]
async fn named_action_rejects_unknown_names() {
    let (app, state) = test_app();
    let (status, body) = post(&app, "/action/rewind").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(error.status, "error");
    assert!(error.message.contains("rewind"));
    assert_eq!(state.get_timer_state().unwrap(), TimerState::new());
}
