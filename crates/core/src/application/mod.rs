// Application Layer - Queue machinery

pub mod buffer;
pub mod limiter;
pub mod queue;
pub mod registry;
pub mod shutdown;

// Re-exports
pub use buffer::BoundedBuffer;
pub use limiter::ConcurrencyLimiter;
pub use queue::{JobQueue, JobQueueHandle, JobTicket};
pub use registry::{QueueRegistry, QueueRegistryBuilder};
pub use shutdown::{cancellation_channel, CancellationSource, CancellationToken};
