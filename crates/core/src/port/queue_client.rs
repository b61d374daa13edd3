// Queue Client Port (Interface)

use crate::domain::{Job, QueueName};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Submission side of an external job queue.
///
/// Execution, retries and ordering inside a queue belong to whatever
/// consumes it. Implementations only have to accept the job durably
/// enough for their backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Submit one job onto `job.queue`
    async fn submit(&self, job: &Job) -> Result<()>;

    /// Cheap reachability probe for health reporting
    async fn health_check(&self) -> Result<()>;

    /// Short backend label for logs and health output
    fn backend_name(&self) -> &'static str;
}

/// Process-local queue backend. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryQueueClient {
    jobs: Mutex<Vec<Job>>,
}

impl InMemoryQueueClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every job submitted so far, in submission order
    pub async fn submitted(&self) -> Vec<Job> {
        self.jobs.lock().await.clone()
    }

    /// Jobs submitted to a single queue, in submission order
    pub async fn jobs_in(&self, queue: &QueueName) -> Vec<Job> {
        self.jobs
            .lock()
            .await
            .iter()
            .filter(|job| &job.queue == queue)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl QueueClient for InMemoryQueueClient {
    async fn submit(&self, job: &Job) -> Result<()> {
        self.jobs.lock().await.push(job.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_keeps_submission_order() {
        let client = InMemoryQueueClient::new();
        let first = Job::new_test("1");
        let second = Job::new_test("2");
        let third = Job::new_test("1");

        client.submit(&first).await.unwrap();
        client.submit(&second).await.unwrap();
        client.submit(&third).await.unwrap();

        assert_eq!(client.submitted().await.len(), 3);

        let user_1 = client.jobs_in(&QueueName::new("user_1")).await;
        assert_eq!(user_1.len(), 2);
        assert_eq!(user_1[0].id, first.id);
        assert_eq!(user_1[1].id, third.id);
    }

    #[tokio::test]
    async fn test_in_memory_is_always_healthy() {
        let client = InMemoryQueueClient::new();
        assert!(client.health_check().await.is_ok());
        assert_eq!(client.backend_name(), "memory");
    }
}
