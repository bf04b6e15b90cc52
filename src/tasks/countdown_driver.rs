//! Countdown driver background task

use std::{sync::Weak, time::Duration};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error};

use crate::{error::TimerError, state::AppState};

/// Cancellable handle to the tick loop; at most one loop is armed at a time
#[derive(Debug, Default)]
pub struct TickSchedule {
    handle: Option<JoinHandle<()>>,
}

impl TickSchedule {
    /// Spawn a new tick loop on the current runtime, cancelling any loop armed before it
    pub fn arm(&mut self, state: Weak<AppState>, period: Duration) -> Result<(), TimerError> {
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        self.disarm();
        self.handle = Some(runtime.spawn(countdown_driver_task(state, period)));
        Ok(())
    }

    /// Abort the armed loop. Returns whether one was still live.
    pub fn disarm(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let live = !handle.is_finished();
                handle.abort();
                live
            }
            None => false,
        }
    }

    /// Whether a spawned loop is still live
    pub fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TickSchedule {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Tick the timer once per `period` until it stops running or its owner is dropped
pub async fn countdown_driver_task(state: Weak<AppState>, period: Duration) {
    debug!("Starting countdown driver task");

    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        let Some(owner) = state.upgrade() else {
            debug!("Application state dropped, stopping countdown driver");
            break;
        };

        match owner.tick_if_running() {
            Ok(Some(timer)) => {
                debug!("Tick: {} {}", timer.display(), timer.session_type);
            }
            Ok(None) => {
                debug!("Timer no longer running, stopping countdown driver");
                break;
            }
            Err(e) => {
                error!("Failed to tick timer: {}", e);
                break;
            }
        }
    }
}
