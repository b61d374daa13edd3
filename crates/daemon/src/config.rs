//! Daemon configuration
//!
//! Defaults layered under `USERQ_*` environment variables.

use anyhow::{Context, Result};
use ::config::{Config, Environment};
use serde::Deserialize;
use userq_core::application::UserIdPolicy;

const DEFAULT_DB_PATH: &str = "~/.userq/queue.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub http_host: String,
    pub http_port: u16,
    pub queue_backend: QueueBackend,
    pub db_path: String,
    pub require_user_id: bool,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::with_prefix("USERQ").try_parsing(true))
    }

    fn from_source(env: Environment) -> Result<Self> {
        let cfg: DaemonConfig = Config::builder()
            .set_default("http_host", "127.0.0.1")?
            .set_default("http_port", 8080)?
            .set_default("queue_backend", "sqlite")?
            .set_default("db_path", DEFAULT_DB_PATH)?
            .set_default("require_user_id", false)?
            .add_source(env)
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(cfg.expanded())
    }

    fn expanded(mut self) -> Self {
        self.db_path = shellexpand::tilde(&self.db_path).into_owned();
        self
    }

    pub fn user_id_policy(&self) -> UserIdPolicy {
        if self.require_user_id {
            UserIdPolicy::RequireNonEmpty
        } else {
            UserIdPolicy::Permissive
        }
    }
}
