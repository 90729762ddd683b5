// Queue Configuration Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};

/// Default concurrency cap: serialize all jobs of a category
pub const DEFAULT_MAX_CONCURRENCY: usize = 1;

/// Ordering / drop policy applied by the bounded buffer.
///
/// Both variants evict the *oldest* pending job on overflow; they differ in
/// which end of the buffer normal dequeue reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// FIFO: dequeue in insertion order
    OldestFirst,
    /// LIFO: dequeue in reverse insertion order. Under sustained overload
    /// recent messages are more likely still relevant, so both dequeue and
    /// eviction favor recency, sacrificing the oldest backlog first.
    NewestFirst,
}

/// Per-category queue configuration, fixed at construction and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Maximum number of buffered (pending) jobs
    pub capacity: usize,
    pub ordering: OrderingPolicy,
    /// Maximum number of jobs executing simultaneously
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl QueueConfig {
    pub fn new(capacity: usize, ordering: OrderingPolicy) -> Self {
        Self {
            capacity,
            ordering,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Both limits must be positive; a zero-capacity queue could never admit
    /// and a zero-concurrency queue could never drain.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(DomainError::InvalidCapacity);
        }
        if self.max_concurrency == 0 {
            return Err(DomainError::InvalidConcurrency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_concurrency_is_serial() {
        let config = QueueConfig::new(16, OrderingPolicy::OldestFirst);
        assert_eq!(config.max_concurrency, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = QueueConfig::new(0, OrderingPolicy::OldestFirst);
        assert_eq!(config.validate(), Err(DomainError::InvalidCapacity));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = QueueConfig::new(8, OrderingPolicy::NewestFirst).with_max_concurrency(0);
        assert_eq!(config.validate(), Err(DomainError::InvalidConcurrency));
    }

    #[test]
    fn test_config_from_static_table_json() {
        // Configuration tables are commonly checked in as data; max_concurrency
        // may be omitted and defaults to serial execution.
        let config: QueueConfig =
            serde_json::from_str(r#"{"capacity": 4096, "ordering": "newest_first"}"#).unwrap();
        assert_eq!(config.capacity, 4096);
        assert_eq!(config.ordering, OrderingPolicy::NewestFirst);
        assert_eq!(config.max_concurrency, 1);
    }
}
