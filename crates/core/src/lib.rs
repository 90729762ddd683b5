// Admitq Core - Admission-controlled job queues
// One bounded queue per message category: buffer overflow is absorbed by
// dropping per an ordering policy, never by blocking producers.

pub mod application;
pub mod domain;
pub mod port;

pub use application::{
    cancellation_channel, CancellationSource, CancellationToken, JobQueue, JobQueueHandle,
    JobTicket, QueueRegistry, QueueRegistryBuilder,
};
pub use domain::{DomainError, JobFailure, MessageCategory, Outcome, OrderingPolicy, QueueConfig};
pub use port::MetricsSink;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
