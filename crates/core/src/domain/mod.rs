// Domain Layer - Job lifecycle and queue configuration types

pub mod category;
pub mod error;
pub mod job;
pub mod queue;

// Re-exports
pub use category::MessageCategory;
pub use error::{DomainError, Result};
pub use job::{Job, JobFailure, JobId, JobPayload, Outcome};
pub use queue::{OrderingPolicy, QueueConfig, DEFAULT_MAX_CONCURRENCY};
