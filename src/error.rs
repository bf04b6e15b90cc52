//! Error types shared by the timer state and the HTTP layer

use thiserror::Error;

/// Errors raised while dispatching timer actions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    /// A mutex guarding shared state was poisoned by a panicking holder
    #[error("failed to lock {0}: lock poisoned")]
    LockPoisoned(&'static str),

    /// An action name received at the dispatch boundary is not recognised
    #[error("unknown timer action: {0}")]
    UnknownAction(String),

    /// The countdown driver was armed from outside a Tokio runtime
    #[error("no Tokio runtime available to run the countdown driver")]
    NoRuntime,
}
