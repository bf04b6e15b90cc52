//! Timer state structure and its pure transitions

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Seconds loaded into a fresh work session
pub const WORK_SECONDS: u32 = 25;
/// Seconds loaded into a fresh break session
pub const BREAK_SECONDS: u32 = 5;

/// Which of the two alternating phases the countdown represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Work,
    Break,
}

impl SessionType {
    /// The phase that follows this one
    pub fn next(self) -> Self {
        match self {
            SessionType::Work => SessionType::Break,
            SessionType::Break => SessionType::Work,
        }
    }

    /// Seconds allotted to this phase when it begins
    pub fn allotted_seconds(self) -> u32 {
        match self {
            SessionType::Work => WORK_SECONDS,
            SessionType::Break => BREAK_SECONDS,
        }
    }

    /// Heading shown for this phase
    pub fn label(self) -> &'static str {
        match self {
            SessionType::Work => "Work Session",
            SessionType::Break => "Break Session",
        }
    }

    /// Lowercase name used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::Work => "work",
            SessionType::Break => "break",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete actions accepted by the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    Start,
    Pause,
    Reset,
    Tick,
}

impl TimerAction {
    /// Lowercase name accepted at the dispatch boundary
    pub fn as_str(self) -> &'static str {
        match self {
            TimerAction::Start => "start",
            TimerAction::Pause => "pause",
            TimerAction::Reset => "reset",
            TimerAction::Tick => "tick",
        }
    }
}

impl FromStr for TimerAction {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(TimerAction::Start),
            "pause" => Ok(TimerAction::Pause),
            "reset" => Ok(TimerAction::Reset),
            "tick" => Ok(TimerAction::Tick),
            other => Err(TimerError::UnknownAction(other.to_string())),
        }
    }
}

/// View state of the two-phase countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub is_running: bool,
    pub minutes: u32,
    /// Always within `0..=59`
    pub seconds: u32,
    pub session_type: SessionType,
}

impl TimerState {
    /// Create the initial state: paused at the start of a work session
    pub fn new() -> Self {
        Self {
            is_running: false,
            minutes: 0,
            seconds: WORK_SECONDS,
            session_type: SessionType::Work,
        }
    }

    /// Mark the countdown as running
    pub fn start(self) -> Self {
        Self { is_running: true, ..self }
    }

    /// Mark the countdown as paused
    pub fn pause(self) -> Self {
        Self { is_running: false, ..self }
    }

    /// Stop and reload the current phase's allotment without changing phase
    pub fn reset(self) -> Self {
        Self {
            is_running: false,
            minutes: 0,
            seconds: self.session_type.allotted_seconds(),
            ..self
        }
    }

    /// Decrement by one second, flipping the phase once the clock reads 0:00
    pub fn tick(self) -> Self {
        if self.minutes == 0 && self.seconds == 0 {
            let session_type = self.session_type.next();
            Self {
                minutes: 0,
                seconds: session_type.allotted_seconds(),
                session_type,
                ..self
            }
        } else if self.seconds == 0 {
            Self {
                minutes: self.minutes - 1,
                seconds: 59,
                ..self
            }
        } else {
            Self {
                seconds: self.seconds - 1,
                ..self
            }
        }
    }

    /// Apply a single action
    pub fn reduce(self, action: TimerAction) -> Self {
        match action {
            TimerAction::Start => self.start(),
            TimerAction::Pause => self.pause(),
            TimerAction::Reset => self.reset(),
            TimerAction::Tick => self.tick(),
        }
    }

    /// Zero-padded `MM:SS` rendering of the remaining time
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    /// Heading for the current phase
    pub fn phase_label(&self) -> &'static str {
        self.session_type.label()
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
