// Application Layer - Use Cases

pub mod user_jobs;

// Re-exports
pub use user_jobs::{DispatchOutcome, DispatchRequest, UserIdPolicy, UserJobService};
