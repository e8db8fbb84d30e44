#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("booking api request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("booking api returned status {0}")]
    Status(u16),

    #[error("invalid booking api payload: {0}")]
    InvalidPayload(String),
}

impl BookingError {
    /// Transient failures worth another attempt: connection problems,
    /// timeouts and upstream 5xx. Payload errors never are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_connect() || err.is_timeout(),
            Self::Status(status) => *status >= 500,
            Self::InvalidPayload(_) => false,
        }
    }
}
