// Dispatch Use Case

use crate::domain::{Job, JobId, QueueName, UserId, WorkItem};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, QueueClient, TimeProvider};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Leading text of every acknowledgement
pub const ACK_PREFIX: &str = "Jobs dispatched for user: ";

/// Dispatch request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchRequest {
    #[serde(default)]
    pub user_id: UserId,
}

impl DispatchRequest {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// How strictly `user_id` is checked before dispatching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserIdPolicy {
    /// Anything goes, including an empty id (queue `user_`)
    #[default]
    Permissive,
    /// Empty ids are rejected with a validation error
    RequireNonEmpty,
}

/// Result of a successful dispatch
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub job_id: JobId,
    pub queue: QueueName,
    pub user_id: UserId,
}

impl DispatchOutcome {
    pub fn acknowledgement(&self) -> String {
        acknowledgement(&self.user_id)
    }
}

/// Plain-text confirmation embedding the user id verbatim
pub fn acknowledgement(user_id: &UserId) -> String {
    format!("{}{}", ACK_PREFIX, user_id.as_str())
}

pub fn validate_request(req: &DispatchRequest, policy: UserIdPolicy) -> Result<()> {
    match policy {
        UserIdPolicy::Permissive => Ok(()),
        UserIdPolicy::RequireNonEmpty if req.user_id.is_empty() => Err(AppError::Validation(
            "user_id is required".to_string(),
        )),
        UserIdPolicy::RequireNonEmpty => Ok(()),
    }
}

/// Execute dispatch use case: one submission onto `user_<id>`
///
/// # Arguments
///
/// * `queue_client` - Queue backend (injected)
/// * `id_provider` - ID generator (injected for determinism)
/// * `time_provider` - Time provider (injected for determinism)
/// * `policy` - user_id validation policy
/// * `req` - Dispatch request
pub async fn execute(
    queue_client: &dyn QueueClient,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    policy: UserIdPolicy,
    req: DispatchRequest,
) -> Result<DispatchOutcome> {
    validate_request(&req, policy)?;

    let queue = QueueName::for_user(&req.user_id);
    let job = Job::new(
        id_provider.generate_id(),
        time_provider.now_millis(),
        queue.clone(),
        WorkItem::process_user(req.user_id.clone()),
    );

    debug!(job_id = %job.id, queue = %queue, "Submitting job");

    // Backend failures go straight back to the caller
    queue_client.submit(&job).await?;

    info!(
        job_id = %job.id,
        queue = %queue,
        backend = queue_client.backend_name(),
        "Jobs dispatched for user"
    );

    Ok(DispatchOutcome {
        job_id: job.id,
        queue,
        user_id: req.user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobState, PROCESS_USER};
    use crate::port::id_provider::SequentialIdProvider;
    use crate::port::queue_client::{InMemoryQueueClient, MockQueueClient};
    use crate::port::time_provider::FixedTimeProvider;

    fn providers() -> (SequentialIdProvider, FixedTimeProvider) {
        (SequentialIdProvider::new("job"), FixedTimeProvider(1_700_000_000_000))
    }

    #[tokio::test]
    async fn test_dispatch_user_42() {
        let (ids, clock) = providers();
        let client = InMemoryQueueClient::new();

        let outcome = execute(
            &client,
            &ids,
            &clock,
            UserIdPolicy::Permissive,
            DispatchRequest::new("42"),
        )
        .await
        .unwrap();

        assert_eq!(outcome.queue.as_str(), "user_42");
        assert_eq!(outcome.job_id, "job-1");
        assert_eq!(outcome.acknowledgement(), "Jobs dispatched for user: 42");

        let jobs = client.submitted().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].queue.as_str(), "user_42");
        assert_eq!(jobs[0].state, JobState::Queued);
        assert_eq!(jobs[0].created_at, 1_700_000_000_000);
        assert_eq!(jobs[0].item.job_type(), PROCESS_USER);
        assert_eq!(jobs[0].item, WorkItem::process_user(UserId::new("42")));
    }

    #[tokio::test]
    async fn test_dispatch_missing_user_id() {
        let (ids, clock) = providers();
        let client = InMemoryQueueClient::new();

        let outcome = execute(
            &client,
            &ids,
            &clock,
            UserIdPolicy::Permissive,
            DispatchRequest::default(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.queue.as_str(), "user_");
        assert_eq!(outcome.acknowledgement(), "Jobs dispatched for user: ");
        assert_eq!(client.submitted().await.len(), 1);
    }

    #[tokio::test]
    async fn test_exactly_one_submission_to_derived_queue() {
        let (ids, clock) = providers();
        let mut client = MockQueueClient::new();
        client
            .expect_submit()
            .withf(|job: &Job| job.queue.as_str() == "user_alice")
            .times(1)
            .returning(|_| Ok(()));
        client.expect_backend_name().return_const("mock");

        let outcome = execute(
            &client,
            &ids,
            &clock,
            UserIdPolicy::Permissive,
            DispatchRequest::new("alice"),
        )
        .await
        .unwrap();

        assert_eq!(outcome.user_id.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let (ids, clock) = providers();
        let mut client = MockQueueClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Err(AppError::Queue("connection refused".to_string())));

        let err = execute(
            &client,
            &ids,
            &clock,
            UserIdPolicy::Permissive,
            DispatchRequest::new("42"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Queue(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_empty_id_without_submitting() {
        let (ids, clock) = providers();
        let mut client = MockQueueClient::new();
        client.expect_submit().times(0);

        let err = execute(
            &client,
            &ids,
            &clock,
            UserIdPolicy::RequireNonEmpty,
            DispatchRequest::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_acknowledgement_keeps_id_verbatim() {
        for raw in ["42", "", "  spaced  ", "<b>x</b>", "ユーザー"] {
            let ack = acknowledgement(&UserId::new(raw));
            assert_eq!(ack, format!("Jobs dispatched for user: {}", raw));
            assert!(ack.ends_with(raw));
        }
    }
}
