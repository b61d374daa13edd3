// Queue Domain Model

use crate::domain::user::UserId;
use serde::{Deserialize, Serialize};

/// Prefix of every per-user queue
pub const USER_QUEUE_PREFIX: &str = "user_";

/// Queue identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueName(String);

impl QueueName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Per-user queue: the literal concatenation of the prefix and the id.
    pub fn for_user(user_id: &UserId) -> Self {
        Self(format!("{}{}", USER_QUEUE_PREFIX, user_id.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueueName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
