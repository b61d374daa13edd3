// User Job Service - dispatch of per-user work

pub mod dispatch;

pub use dispatch::{acknowledgement, DispatchOutcome, DispatchRequest, UserIdPolicy};

use crate::error::Result;
use crate::port::{IdProvider, QueueClient, TimeProvider};
use std::sync::Arc;

/// User Job Service
pub struct UserJobService {
    queue_client: Arc<dyn QueueClient>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    policy: UserIdPolicy,
}

impl UserJobService {
    pub fn new(
        queue_client: Arc<dyn QueueClient>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            queue_client,
            id_provider,
            time_provider,
            policy: UserIdPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UserIdPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Dispatch per-user processing onto the user's queue
    pub async fn dispatch(&self, req: DispatchRequest) -> Result<DispatchOutcome> {
        dispatch::execute(
            self.queue_client.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            self.policy,
            req,
        )
        .await
    }

    /// Probe the queue backend
    pub async fn health_check(&self) -> Result<()> {
        self.queue_client.health_check().await
    }

    pub fn backend_name(&self) -> &'static str {
        self.queue_client.backend_name()
    }
}
