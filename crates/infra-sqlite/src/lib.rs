// userq Infrastructure - SQLite Adapter
// Implements: QueueClient (persistent job table)

mod connection;
mod error;
mod job_queue;
mod migration;

pub use connection::create_pool;
pub use job_queue::SqliteJobQueue;
pub use migration::run_migrations;

// Note: sqlx::Error conversion is handled by a helper function (error::map_sqlx_error)
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
