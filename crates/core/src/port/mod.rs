// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod queue_client;
pub mod time_provider;

// Re-exports
pub use id_provider::IdProvider;
pub use queue_client::{InMemoryQueueClient, QueueClient};
pub use time_provider::TimeProvider;
