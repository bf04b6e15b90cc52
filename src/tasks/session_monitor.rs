//! Session monitor background task

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::TimerState;

/// Background task that logs phase and run-state changes of the timer
pub async fn session_monitor_task(mut timer_rx: watch::Receiver<TimerState>) {
    info!("Starting session monitor task");

    let mut last = *timer_rx.borrow_and_update();

    while timer_rx.changed().await.is_ok() {
        let current = *timer_rx.borrow_and_update();

        if let Some(message) = describe_change(&last, &current) {
            info!("{}", message);
        }
        debug!("Timer update: {} ({})", current.display(), current.session_type);

        last = current;
    }

    debug!("Timer update channel closed, stopping session monitor");
}

/// Human-readable summary of a notable transition, if there is one
pub fn describe_change(previous: &TimerState, current: &TimerState) -> Option<String> {
    if previous.session_type != current.session_type {
        Some(format!(
            "{} finished, {} started at {}",
            previous.phase_label(),
            current.phase_label(),
            current.display()
        ))
    } else if previous.is_running != current.is_running {
        let verb = if current.is_running { "started" } else { "paused" };
        Some(format!("{} {} at {}", current.phase_label(), verb, current.display()))
    } else {
        None
    }
}
