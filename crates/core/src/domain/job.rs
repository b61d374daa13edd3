// Job Domain Model

use crate::domain::error::{DomainError, Result};
use crate::domain::queue::QueueName;
use crate::domain::user::UserId;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Job ID (UUID v4)
pub type JobId = String;

/// Job type tag for per-user processing
pub const PROCESS_USER: &str = "PROCESS_USER";

/// Job State
///
/// Only `Queued` is ever written by this service; the rest are set by
/// whatever consumes the queue and must still parse back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Queued,
    Running,
    Done,
    Failed,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Queued => write!(f, "QUEUED"),
            JobState::Running => write!(f, "RUNNING"),
            JobState::Done => write!(f, "DONE"),
            JobState::Failed => write!(f, "FAILED"),
        }
    }
}

impl std::str::FromStr for JobState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "QUEUED" => Ok(JobState::Queued),
            "RUNNING" => Ok(JobState::Running),
            "DONE" => Ok(JobState::Done),
            "FAILED" => Ok(JobState::Failed),
            other => Err(DomainError::UnknownJobState(other.to_string())),
        }
    }
}

/// Unit of deferred work handed to a queue backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkItem {
    /// Run per-user processing
    ProcessUser { user_id: UserId },
}

impl WorkItem {
    pub fn process_user(user_id: UserId) -> Self {
        WorkItem::ProcessUser { user_id }
    }

    pub fn job_type(&self) -> &'static str {
        match self {
            WorkItem::ProcessUser { .. } => PROCESS_USER,
        }
    }

    /// Payload as stored next to the job type
    pub fn payload(&self) -> serde_json::Value {
        match self {
            WorkItem::ProcessUser { user_id } => json!({ "user_id": user_id.as_str() }),
        }
    }

    /// Rebuild from a stored `(job_type, payload)` pair
    pub fn from_parts(job_type: &str, payload: &serde_json::Value) -> Result<Self> {
        match job_type {
            PROCESS_USER => {
                let raw = payload.get("user_id").ok_or_else(|| DomainError::InvalidPayload {
                    job_type: job_type.to_string(),
                    reason: "missing user_id".to_string(),
                })?;
                Ok(WorkItem::ProcessUser {
                    user_id: UserId::from_json(raw)?,
                })
            }
            other => Err(DomainError::UnknownJobType(other.to_string())),
        }
    }
}

/// Job Entity: a work item addressed to a queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub queue: QueueName,
    pub item: WorkItem,
    pub state: JobState,
    pub attempts: i32,
    pub created_at: i64, // epoch ms
}

impl Job {
    /// Create a new job
    ///
    /// # Arguments
    ///
    /// * `id` - Unique job ID (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    /// * `queue` - Target queue
    /// * `item` - Work to perform
    pub fn new(id: impl Into<String>, created_at: i64, queue: QueueName, item: WorkItem) -> Self {
        Self {
            id: id.into(),
            queue,
            item,
            state: JobState::Queued,
            attempts: 0,
            created_at,
        }
    }

    /// Create a test job with deterministic ID and timestamp.
    ///
    /// Uses a simple counter for test IDs (test-1, test-2, ...).
    /// Timestamps start at 1000 and increment by 1000.
    ///
    /// **Note**: only for tests. Production code injects ID and time via providers.
    pub fn new_test(user_id: impl Into<String>) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let user_id = UserId::new(user_id);

        Self::new(
            format!("test-{}", counter),
            (counter * 1000) as i64,
            QueueName::for_user(&user_id),
            WorkItem::process_user(user_id),
        )
    }
}
