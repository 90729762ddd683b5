// Job Domain Model
// A job is an opaque asynchronous payload plus its admission timestamp and
// the channel that settles the submitter's ticket exactly once.

use std::time::Instant;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::oneshot;

/// Job ID - monotonically increasing per queue instance, for log correlation only
pub type JobId = u64;

/// The type-erased validation callback carried by a job.
///
/// Invoked at most once, on the concurrency substrate, after a slot frees.
pub type JobPayload<T> = Box<dyn FnOnce() -> BoxFuture<'static, std::result::Result<T, JobFailure>> + Send>;

/// Failure surface of the validation callback itself.
///
/// The queue passes both variants through unchanged; it never interprets them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobFailure {
    /// Domain-level rejection by the callback (expected under adversarial input)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unexpected callback failure
    #[error("internal error: {0}")]
    Internal(String),
}

/// Settled result of a submitted job.
///
/// Every submitted job resolves its caller exactly once with one of these.
/// `Dropped` and `Cancelled` are expected terminal states, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Callback ran and accepted the message
    Success(T),
    /// Callback ran and rejected the message
    ValidationFailed(String),
    /// Callback failed or panicked; the drain loop keeps going
    InternalError(String),
    /// Evicted from the buffer on overflow, callback never invoked
    Dropped,
    /// Queue cancelled before the job could start, callback never invoked
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl<T> From<std::result::Result<T, JobFailure>> for Outcome<T> {
    fn from(result: std::result::Result<T, JobFailure>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(JobFailure::Validation(reason)) => Outcome::ValidationFailed(reason),
            Err(JobFailure::Internal(error)) => Outcome::InternalError(error),
        }
    }
}

/// A pending unit of work.
///
/// Owned by the bounded buffer while pending, then by the worker slot while
/// running; consumed on settlement or eviction.
pub struct Job<T> {
    id: JobId,
    payload: JobPayload<T>,
    enqueued_at: Instant,
    outcome_tx: oneshot::Sender<Outcome<T>>,
}

impl<T> Job<T> {
    pub(crate) fn new(
        id: JobId,
        payload: JobPayload<T>,
        outcome_tx: oneshot::Sender<Outcome<T>>,
    ) -> Self {
        Self {
            id,
            payload,
            enqueued_at: Instant::now(),
            outcome_tx,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    /// Settle the submitter's ticket without invoking the payload (drop / cancel paths).
    /// The submitter may have stopped listening; that is not an error.
    pub(crate) fn settle(self, outcome: Outcome<T>) {
        let _ = self.outcome_tx.send(outcome);
    }

    /// Decompose for execution (start path).
    pub(crate) fn into_parts(
        self,
    ) -> (
        JobId,
        JobPayload<T>,
        Instant,
        oneshot::Sender<Outcome<T>>,
    ) {
        (self.id, self.payload, self.enqueued_at, self.outcome_tx)
    }
}

impl<T> std::fmt::Debug for Job<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("enqueued_at", &self.enqueued_at)
            .finish_non_exhaustive()
    }
}
