//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_driver;
pub mod session_monitor;

// Re-export main items
pub use countdown_driver::{countdown_driver_task, TickSchedule};
pub use session_monitor::session_monitor_task;
