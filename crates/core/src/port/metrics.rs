// Metrics Sink Port
// The queue only emits observations; storage and export live elsewhere.

use std::time::Duration;

/// Receiver for the four per-queue observations.
///
/// One sink per queue instance, supplied optionally at construction. All
/// methods are called from the queue's bookkeeping task or a worker slot and
/// must be cheap and non-blocking.
pub trait MetricsSink: Send + Sync {
    /// Current buffer length (gauge, sampled on change)
    fn queue_length(&self, length: usize);

    /// A buffered job was evicted on overflow (counter)
    fn job_dropped(&self);

    /// Time between job creation and execution start (histogram).
    /// Emitted for executed jobs only, never for dropped or cancelled ones.
    fn job_wait_time(&self, wait: Duration);

    /// Time between execution start and callback completion (histogram)
    fn job_run_time(&self, run: Duration);
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    /// In-memory sink recording every observation, for tests and embedding.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        lengths: Mutex<Vec<usize>>,
        dropped: AtomicU64,
        wait_times: Mutex<Vec<Duration>>,
        run_times: Mutex<Vec<Duration>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every length sample seen so far, in emission order
        pub fn lengths(&self) -> Vec<usize> {
            self.lengths.lock().unwrap().clone()
        }

        pub fn max_length(&self) -> usize {
            self.lengths.lock().unwrap().iter().copied().max().unwrap_or(0)
        }

        pub fn last_length(&self) -> Option<usize> {
            self.lengths.lock().unwrap().last().copied()
        }

        pub fn dropped(&self) -> u64 {
            self.dropped.load(Ordering::SeqCst)
        }

        pub fn wait_times(&self) -> Vec<Duration> {
            self.wait_times.lock().unwrap().clone()
        }

        pub fn run_times(&self) -> Vec<Duration> {
            self.run_times.lock().unwrap().clone()
        }
    }

    impl MetricsSink for RecordingSink {
        fn queue_length(&self, length: usize) {
            self.lengths.lock().unwrap().push(length);
        }

        fn job_dropped(&self) {
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }

        fn job_wait_time(&self, wait: Duration) {
            self.wait_times.lock().unwrap().push(wait);
        }

        fn job_run_time(&self, run: Duration) {
            self.run_times.lock().unwrap().push(run);
        }
    }
}
