// Queue Registry
// Explicit category -> queue mapping owned by the composition root. No
// ambient globals: the registry is constructed once at startup and passed
// down, its lifetime bound to the node's run.

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::info;

use crate::application::queue::{JobQueue, JobQueueHandle};
use crate::application::shutdown::CancellationSource;
use crate::domain::error::Result;
use crate::domain::{MessageCategory, QueueConfig};
use crate::port::MetricsSink;

/// One independently configured job queue per message category.
///
/// Entries share nothing: each has its own buffer, limiter and drain loop.
/// All of them subscribe to the same cancellation source.
pub struct QueueRegistry<C, T> {
    queues: HashMap<C, JobQueueHandle<T>>,
}

impl<C: Eq + Hash, T> QueueRegistry<C, T> {
    pub fn builder() -> QueueRegistryBuilder<C, T> {
        QueueRegistryBuilder {
            entries: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn get(&self, category: &C) -> Option<&JobQueueHandle<T>> {
        self.queues.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &C> {
        self.queues.keys()
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

impl<T: Send + 'static> QueueRegistry<MessageCategory, T> {
    /// Build the full default table, one queue per known category.
    ///
    /// `sink_for` supplies the per-category metrics sink, or `None` to run a
    /// category unobserved.
    pub fn with_default_table(
        cancel: &CancellationSource,
        mut sink_for: impl FnMut(MessageCategory) -> Option<Arc<dyn MetricsSink>>,
    ) -> Result<Self> {
        let mut builder = Self::builder();
        for category in MessageCategory::ALL {
            builder = builder.register(category, category.default_config(), sink_for(category));
        }
        builder.build(cancel)
    }
}

/// Collects per-category configurations before any queue task is spawned.
pub struct QueueRegistryBuilder<C, T> {
    entries: Vec<(C, QueueConfig, Option<Arc<dyn MetricsSink>>)>,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> QueueRegistryBuilder<C, T>
where
    C: Eq + Hash + std::fmt::Display,
    T: Send + 'static,
{
    pub fn register(
        mut self,
        category: C,
        config: QueueConfig,
        metrics: Option<Arc<dyn MetricsSink>>,
    ) -> Self {
        self.entries.push((category, config, metrics));
        self
    }

    /// Validate every config and spawn one queue task per entry. Each queue
    /// receives its own token minted from the shared source.
    pub fn build(self, cancel: &CancellationSource) -> Result<QueueRegistry<C, T>> {
        let mut queues = HashMap::with_capacity(self.entries.len());
        for (category, config, metrics) in self.entries {
            info!(
                category = %category,
                capacity = config.capacity,
                ordering = ?config.ordering,
                max_concurrency = config.max_concurrency,
                "starting job queue"
            );
            let handle = JobQueue::spawn(config, cancel.token(), metrics)?;
            queues.insert(category, handle);
        }
        Ok(QueueRegistry { queues })
    }
}
