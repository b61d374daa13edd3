// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unsupported user_id value: {0}")]
    UnsupportedUserId(String),

    #[error("Unknown job state: {0}")]
    UnknownJobState(String),

    #[error("Unknown job type: {0}")]
    UnknownJobType(String),

    #[error("Invalid payload for {job_type}: {reason}")]
    InvalidPayload { job_type: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
