use thiserror::Error;

#[derive(Debug, Error)]
pub enum EscalationError {
    /// The router could not build a valid request (no replied-to message,
    /// missing target, self-warning).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The counter store could not be reached. Nothing was committed.
    #[error("warning store unavailable: {0}")]
    StorageUnavailable(#[source] anyhow::Error),

    /// A ban/mute/kick call failed or timed out.
    #[error("{action} failed: {reason}")]
    GatewayActionFailed { action: &'static str, reason: String },
}

impl EscalationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Storage failures abort without side effects and are safe to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
