use reqwest::StatusCode;
use thiserror::Error;

/// Input rejected before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question is empty")]
    MissingQuestion,

    #[error("document reference is empty")]
    MissingDocument,
}

/// Failure of the round trip through the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway rejected the query with status {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gateway returned an undecodable body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("submission rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("no submission is in flight")]
    NoSubmissionInFlight,

    #[error("query failed: {0}")]
    Upstream(#[from] GatewayError),
}
