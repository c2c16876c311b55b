use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed medicines document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unreadable medicine record: {0}")]
    BadRecord(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    /// Errors caused by the request rather than by the persisted data or the disk.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
