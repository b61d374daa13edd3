// SQLite QueueClient Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;
use userq_core::domain::{Job, JobId, JobState, QueueName, WorkItem};
use userq_core::error::Result;
use userq_core::port::QueueClient;

/// Persistent queue: one row per job in the `jobs` table.
///
/// Consumers pick rows up by `(queue, state, created_at)`; this adapter
/// only writes `QUEUED` rows and reads them back for inspection.
#[derive(Clone)]
pub struct SqliteJobQueue {
    pool: SqlitePool,
}

impl SqliteJobQueue {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find job by ID
    pub async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(JobRow::into_job).transpose()
    }

    /// Jobs of one queue, oldest first
    pub async fn list_by_queue(&self, queue: &QueueName, limit: i64) -> Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT * FROM jobs
            WHERE queue = ?
            ORDER BY created_at ASC, rowid ASC
            LIMIT ?
            "#,
        )
        .bind(queue.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(JobRow::into_job).collect()
    }

    /// Count jobs by state within a queue
    pub async fn count_by_state(&self, queue: &QueueName, state: JobState) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE queue = ? AND state = ?")
                .bind(queue.as_str())
                .bind(state.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(count)
    }
}

#[async_trait]
impl QueueClient for SqliteJobQueue {
    async fn submit(&self, job: &Job) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, queue, job_type, payload, state, attempts, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&job.id)
        .bind(job.queue.as_str())
        .bind(job.item.job_type())
        .bind(job.item.payload().to_string())
        .bind(job.state.to_string())
        .bind(job.attempts)
        .bind(job.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(job_id = %job.id, queue = %job.queue, "Job row inserted");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: String,
    queue: String,
    job_type: String,
    payload: String,
    state: String,
    attempts: i32,
    created_at: i64,
}

impl JobRow {
    fn into_job(self) -> Result<Job> {
        let payload: serde_json::Value = serde_json::from_str(&self.payload)?;
        let item = WorkItem::from_parts(&self.job_type, &payload)?;
        let state: JobState = self.state.parse()?;

        Ok(Job {
            id: self.id,
            queue: QueueName::new(self.queue),
            item,
            state,
            attempts: self.attempts,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use userq_core::domain::UserId;
    use userq_core::error::AppError;

    async fn setup_test_queue() -> SqliteJobQueue {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteJobQueue::new(pool)
    }

    #[tokio::test]
    async fn test_submit_and_find() {
        let queue = setup_test_queue().await;
        let job = Job::new_test("42");

        queue.submit(&job).await.unwrap();

        let found = queue.find_by_id(&job.id).await.unwrap().unwrap();
        assert_eq!(found, job);
        assert_eq!(found.queue.as_str(), "user_42");
        assert_eq!(
            found.item,
            WorkItem::process_user(UserId::new("42"))
        );
    }

    #[tokio::test]
    async fn test_find_missing() {
        let queue = setup_test_queue().await;
        assert!(queue
            .find_by_id(&"nope".to_string())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let queue = setup_test_queue().await;
        let job = Job::new_test("7");

        queue.submit(&job).await.unwrap();
        let err = queue.submit(&job).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert!(err.to_string().contains("Unique constraint"));
    }

    #[tokio::test]
    async fn test_queues_are_partitioned_per_user() {
        let queue = setup_test_queue().await;
        for user in ["a", "b", "a", ""] {
            queue.submit(&Job::new_test(user)).await.unwrap();
        }

        let user_a = queue
            .list_by_queue(&QueueName::new("user_a"), 10)
            .await
            .unwrap();
        assert_eq!(user_a.len(), 2);
        assert!(user_a[0].created_at < user_a[1].created_at);

        let empty = QueueName::new("user_");
        assert_eq!(
            queue.count_by_state(&empty, JobState::Queued).await.unwrap(),
            1
        );
        assert_eq!(
            queue
                .count_by_state(&QueueName::new("user_b"), JobState::Done)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_health_check() {
        let queue = setup_test_queue().await;
        assert!(queue.health_check().await.is_ok());
        assert_eq!(queue.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn test_closed_pool_reports_error() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        let queue = SqliteJobQueue::new(pool.clone());
        pool.close().await;

        assert!(queue.health_check().await.is_err());
        assert!(queue.submit(&Job::new_test("1")).await.is_err());
    }
}
