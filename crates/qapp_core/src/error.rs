use thiserror::Error;

/// User-visible failure categories. Every variant ends up as text in the UI;
/// none of them stops the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QappError {
    /// Submitted URL did not parse; no request was sent.
    #[error("Invalid URL {0}")]
    Validation(String),
    /// The request could not be completed.
    #[error("request failed: {0}")]
    Transport(String),
    /// The service answered but had nothing for the request.
    #[error("{0}")]
    NotFound(String),
    /// The embedding host rejected or could not serve the call.
    #[error("host bridge error: {0}")]
    HostBridge(String),
}
