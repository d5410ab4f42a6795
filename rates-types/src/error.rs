//! Error types for the exchange rate watcher.

/// Lifecycle and argument errors returned by the rates manager.
///
/// These are caller mistakes: they fail the offending call but leave the
/// manager itself usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManagerError {
    #[error("Rates manager is already running")]
    AlreadyRunning,

    #[error("Rates manager is not running")]
    NotRunning,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No Tokio runtime available to drive the schedule")]
    NoRuntime,
}

/// A failed fetch from a rate source.
///
/// Never escapes a fetch cycle: the scheduler logs it and waits for the
/// next tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The source could not be reached (connect, IO, timeout).
    #[error("Transport failure: {message}")]
    Transport { message: String },

    /// The source answered but did not report success.
    #[error("Response status: {status} {status_text} | Response data: {body}")]
    Rejected {
        status: u16,
        status_text: String,
        body: String,
    },
}

impl FetchError {
    /// Creates a transport failure from any displayable error.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        FetchError::Transport {
            message: err.to_string(),
        }
    }

    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::Rejected { .. } => "rejected",
        }
    }
}
