// Bounded Buffer - pending jobs with an ordering/drop policy

use std::collections::VecDeque;

use crate::domain::OrderingPolicy;

/// Bounded sequence of pending items.
///
/// Insertion never blocks and never rejects the new item: at capacity,
/// exactly one existing item is evicted per the ordering policy and handed
/// back to the caller for a drop notification. Invariant: `len() <= capacity`
/// at every observation point.
#[derive(Debug)]
pub struct BoundedBuffer<I> {
    items: VecDeque<I>,
    capacity: usize,
    ordering: OrderingPolicy,
}

impl<I> BoundedBuffer<I> {
    /// `capacity` must be validated positive by the caller (QueueConfig does).
    pub fn new(capacity: usize, ordering: OrderingPolicy) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            ordering,
        }
    }

    /// Insert the item, evicting one existing item if at capacity.
    ///
    /// Both policies sacrifice the stalest pending entry: the new submission
    /// is always admitted.
    pub fn try_insert(&mut self, item: I) -> Option<I> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Remove the next item to execute; `None` is a valid idle result.
    pub fn take_next(&mut self) -> Option<I> {
        match self.ordering {
            OrderingPolicy::OldestFirst => self.items.pop_front(),
            OrderingPolicy::NewestFirst => self.items.pop_back(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
