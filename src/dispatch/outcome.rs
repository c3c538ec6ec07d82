use std::fmt;

use crate::consts::FAULT_PREFIX;

/// Caller-visible status class of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    ClientError,
    ServerError,
}

impl OutcomeStatus {
    /// HTTP status code for this class.
    pub fn code(&self) -> u16 {
        match self {
            OutcomeStatus::Success => 200,
            OutcomeStatus::ClientError => 400,
            OutcomeStatus::ServerError => 500,
        }
    }
}

/// The terminal result of every dispatch operation. Faults never escape
/// as errors; they end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The client produced a usable payload.
    Accepted { payload: String },
    /// The request was malformed, or the client produced nothing.
    Rejected { reason: String },
    /// The client (or a prerequisite step) failed outright.
    Faulted { message: String },
}

impl DispatchOutcome {
    pub fn accepted(payload: impl Into<String>) -> Self {
        Self::Accepted {
            payload: payload.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Wrap a fault, marking its message as internal. Only the outermost
    /// message is shown; context layers underneath are left out.
    pub fn faulted(err: &anyhow::Error) -> Self {
        Self::Faulted {
            message: format!("{FAULT_PREFIX}{err}"),
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            DispatchOutcome::Accepted { .. } => OutcomeStatus::Success,
            DispatchOutcome::Rejected { .. } => OutcomeStatus::ClientError,
            DispatchOutcome::Faulted { .. } => OutcomeStatus::ServerError,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            DispatchOutcome::Accepted { payload } => payload,
            DispatchOutcome::Rejected { reason } => reason,
            DispatchOutcome::Faulted { message } => message,
        }
    }

    pub fn into_body(self) -> String {
        match self {
            DispatchOutcome::Accepted { payload } => payload,
            DispatchOutcome::Rejected { reason } => reason,
            DispatchOutcome::Faulted { message } => message,
        }
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status().code(), self.body())
    }
}
