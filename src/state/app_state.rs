//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{SessionType, TimerAction, TimerState};
use crate::{error::TimerError, tasks::TickSchedule};

/// Owns the single timer instance and the driver that ticks it
#[derive(Debug)]
pub struct AppState {
    timer_state: Mutex<TimerState>,
    /// Handle to the armed tick loop, if any
    ticker: Mutex<TickSchedule>,
    pub tick_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last client action tracking; driver ticks are not recorded here
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    completed_work_sessions: AtomicU64,
    /// Channel for timer updates
    timer_update_tx: watch::Sender<TimerState>,
}

impl AppState {
    /// Create a new AppState holding the initial timer state
    pub fn new(port: u16, host: String, tick_interval: Duration) -> Self {
        let initial = TimerState::new();
        let (timer_update_tx, _) = watch::channel(initial);

        Self {
            timer_state: Mutex::new(initial),
            ticker: Mutex::new(TickSchedule::default()),
            tick_interval,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            completed_work_sessions: AtomicU64::new(0),
            timer_update_tx,
        }
    }

    /// Apply an action, publish the result and arm or cancel the driver to match
    pub fn dispatch(self: &Arc<Self>, action: TimerAction) -> Result<TimerState, TimerError> {
        self.apply(|_| action)
    }

    /// Pause when running, start otherwise
    pub fn toggle(self: &Arc<Self>) -> Result<TimerState, TimerError> {
        self.apply(|current| {
            if current.is_running {
                TimerAction::Pause
            } else {
                TimerAction::Start
            }
        })
    }

    fn apply<F>(self: &Arc<Self>, choose: F) -> Result<TimerState, TimerError>
    where
        F: FnOnce(&TimerState) -> TimerAction,
    {
        let mut timer = self.timer_state.lock()
            .map_err(|_| TimerError::LockPoisoned("timer state"))?;

        let previous = *timer;
        let action = choose(&previous);
        let next = previous.reduce(action);

        // Driver first: a failed arm must leave the state uncommitted
        self.sync_ticker(next.is_running)?;
        *timer = next;
        self.publish(previous, next);
        drop(timer);

        self.record_action(action.as_str());
        debug!("Dispatched {}: {} {}", action.as_str(), next.display(), next.session_type);
        Ok(next)
    }

    /// Apply one tick if the timer is still running; `None` means it was paused
    pub fn tick_if_running(&self) -> Result<Option<TimerState>, TimerError> {
        let mut timer = self.timer_state.lock()
            .map_err(|_| TimerError::LockPoisoned("timer state"))?;

        if !timer.is_running {
            return Ok(None);
        }

        let previous = *timer;
        let next = previous.tick();
        *timer = next;
        self.publish(previous, next);
        Ok(Some(next))
    }

    fn publish(&self, previous: TimerState, next: TimerState) {
        if previous.session_type == SessionType::Work && next.session_type == SessionType::Break {
            let total = self.completed_work_sessions.fetch_add(1, Ordering::Relaxed) + 1;
            info!("Work session completed ({} so far)", total);
        }
        self.timer_update_tx.send_replace(next);
    }

    fn sync_ticker(self: &Arc<Self>, running: bool) -> Result<(), TimerError> {
        let mut ticker = self.ticker.lock()
            .map_err(|_| TimerError::LockPoisoned("tick schedule"))?;

        if running && !ticker.is_armed() {
            ticker.arm(Arc::downgrade(self), self.tick_interval)?;
            info!("Countdown driver armed ({}ms period)", self.tick_interval.as_millis());
        } else if !running && ticker.disarm() {
            info!("Countdown driver cancelled");
        }
        Ok(())
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to record last action {}: {}", action, e),
        }
        match self.last_action_time.lock() {
            Ok(mut last_time) => *last_time = Some(Utc::now()),
            Err(e) => warn!("Failed to record last action time: {}", e),
        }
    }

    /// Cancel the driver without touching the timer state
    pub fn shutdown(&self) -> Result<(), TimerError> {
        let mut ticker = self.ticker.lock()
            .map_err(|_| TimerError::LockPoisoned("tick schedule"))?;

        if ticker.disarm() {
            info!("Countdown driver cancelled on shutdown");
        }
        Ok(())
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, TimerError> {
        self.timer_state.lock()
            .map(|state| *state)
            .map_err(|_| TimerError::LockPoisoned("timer state"))
    }

    /// Whether a tick loop is currently scheduled
    pub fn driver_armed(&self) -> Result<bool, TimerError> {
        self.ticker.lock()
            .map(|ticker| ticker.is_armed())
            .map_err(|_| TimerError::LockPoisoned("tick schedule"))
    }

    /// Subscribe to every published timer state
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Number of work sessions that ran down and flipped to a break
    pub fn completed_work_sessions(&self) -> u64 {
        self.completed_work_sessions.load(Ordering::Relaxed)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
