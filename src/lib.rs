//! Pomodoro Server - A state-managed HTTP server driving a Pomodoro countdown
//!
//! This library provides a two-phase (work/break) countdown timer, the
//! background driver that ticks it once per period while running, and an
//! HTTP API for dispatching timer actions and reading the current view.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, SessionType, TimerAction, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
