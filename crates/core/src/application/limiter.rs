// Concurrency Limiter - hard ceiling on simultaneously executing jobs

/// Counts in-flight executions against a fixed cap.
///
/// Mutated only by the owning queue's bookkeeping task, so a plain counter
/// suffices; the cap is never exceeded even transiently.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    in_flight: usize,
    max: usize,
}

impl ConcurrencyLimiter {
    /// `max` must be validated positive by the caller (QueueConfig does).
    pub fn new(max: usize) -> Self {
        Self { in_flight: 0, max }
    }

    /// Claim a slot; denied when the cap is reached.
    pub fn try_acquire(&mut self) -> bool {
        if self.in_flight < self.max {
            self.in_flight += 1;
            true
        } else {
            false
        }
    }

    pub fn release(&mut self) {
        debug_assert!(self.in_flight > 0, "release without matching acquire");
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }
}
