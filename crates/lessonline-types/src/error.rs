use thiserror::Error;

/// Errors returned by external collaborators (LINE, the lesson-record
/// service). The core never retries on these; it logs them and moves on.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("not configured: {0}")]
    NotConfigured(String),

    /// The caller passed an identifier that cannot name a single resource.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}
