// Domain Layer - Pure business logic and entities

pub mod error;
pub mod job;
pub mod queue;
pub mod user;

// Re-exports
pub use error::DomainError;
pub use job::{Job, JobId, JobState, WorkItem, PROCESS_USER};
pub use queue::{QueueName, USER_QUEUE_PREFIX};
pub use user::UserId;
