// Job Queue Orchestrator
// One actor task per category owns the buffer and the limiter; submitters
// only hand jobs over a mailbox, so bookkeeping is serialized by construction.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::application::buffer::BoundedBuffer;
use crate::application::limiter::ConcurrencyLimiter;
use crate::application::shutdown::CancellationToken;
use crate::domain::error::Result;
use crate::domain::{Job, JobFailure, JobPayload, Outcome, QueueConfig};
use crate::port::MetricsSink;

/// Awaitable settlement of a submitted job.
///
/// Resolves exactly once with the job's outcome. Dropping the ticket does not
/// cancel the job.
pub struct JobTicket<T> {
    rx: oneshot::Receiver<Outcome<T>>,
}

impl<T> JobTicket<T> {
    fn settled(outcome: Outcome<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        Self { rx }
    }
}

impl<T> Future for JobTicket<T> {
    type Output = Outcome<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            // The queue task is gone; only possible once shutdown has begun
            Poll::Ready(Err(_)) => Poll::Ready(Outcome::Cancelled),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Cloneable submission handle for one category's queue.
pub struct JobQueueHandle<T> {
    tx: mpsc::UnboundedSender<Job<T>>,
    cancel: CancellationToken,
    next_id: Arc<AtomicU64>,
}

impl<T> Clone for JobQueueHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            cancel: self.cancel.clone(),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T: Send + 'static> JobQueueHandle<T> {
    /// Submit a validation callback for queued execution.
    ///
    /// Returns as soon as the job is handed to the queue; the ticket settles
    /// later with one of the five outcomes. After cancellation the callback
    /// is never invoked and the ticket settles `Cancelled` immediately.
    pub fn submit<F, Fut>(&self, work: F) -> JobTicket<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<T, JobFailure>> + Send + 'static,
    {
        if self.cancel.is_cancelled() {
            return JobTicket::settled(Outcome::Cancelled);
        }

        let (outcome_tx, rx) = oneshot::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload: JobPayload<T> = Box::new(move || work().boxed());
        let job = Job::new(id, payload, outcome_tx);

        // A closed mailbox means the queue observed cancellation first
        if let Err(mpsc::error::SendError(job)) = self.tx.send(job) {
            job.settle(Outcome::Cancelled);
        }
        JobTicket { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Per-category orchestrator: drains the bounded buffer into concurrency
/// slots, reacting to three events - new submission, slot release,
/// cancellation.
pub struct JobQueue<T> {
    buffer: BoundedBuffer<Job<T>>,
    limiter: ConcurrencyLimiter,
    metrics: Option<Arc<dyn MetricsSink>>,
    rx: mpsc::UnboundedReceiver<Job<T>>,
    cancel: CancellationToken,
    running: JoinSet<()>,
}

impl<T: Send + 'static> JobQueue<T> {
    /// Validate the config, spawn the drain loop on the current runtime and
    /// return the submission handle. One call per message category.
    pub fn spawn(
        config: QueueConfig,
        cancel: CancellationToken,
        metrics: Option<Arc<dyn MetricsSink>>,
    ) -> Result<JobQueueHandle<T>> {
        config.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let queue = Self {
            buffer: BoundedBuffer::new(config.capacity, config.ordering),
            limiter: ConcurrencyLimiter::new(config.max_concurrency),
            metrics,
            rx,
            cancel: cancel.clone(),
            running: JoinSet::new(),
        };
        tokio::spawn(queue.run());

        Ok(JobQueueHandle {
            tx,
            cancel,
            next_id: Arc::new(AtomicU64::new(0)),
        })
    }

    async fn run(mut self) {
        loop {
            self.fill_slots();
            tokio::select! {
                maybe_job = self.rx.recv() => {
                    match maybe_job {
                        Some(job) => self.admit(job),
                        // All handles dropped: finish what was admitted
                        None => break,
                    }
                }
                Some(_joined) = self.running.join_next(), if !self.running.is_empty() => {
                    self.limiter.release();
                }
                _ = self.cancel.cancelled() => {
                    self.cancel_pending().await;
                    return;
                }
            }
        }
        self.drain_remaining().await;
    }

    /// Admit a job into the buffer, settling the evicted one as dropped.
    fn admit(&mut self, job: Job<T>) {
        debug!(job_id = job.id(), buffered = self.buffer.len(), "job admitted");
        if let Some(evicted) = self.buffer.try_insert(job) {
            debug!(job_id = evicted.id(), "job evicted on overflow");
            evicted.settle(Outcome::Dropped);
            if let Some(metrics) = &self.metrics {
                metrics.job_dropped();
            }
        }
        self.observe_length();
    }

    /// Move jobs from buffer to execution while slots are free.
    fn fill_slots(&mut self) {
        let mut started = false;
        while self.limiter.try_acquire() {
            match self.buffer.take_next() {
                Some(job) => {
                    self.start(job);
                    started = true;
                }
                None => {
                    self.limiter.release();
                    break;
                }
            }
        }
        if started {
            self.observe_length();
        }
    }

    /// Dispatch one job onto the runtime. The spawned task settles the ticket
    /// itself; the drain loop only learns that the slot freed.
    fn start(&mut self, job: Job<T>) {
        let (id, payload, enqueued_at, outcome_tx) = job.into_parts();
        let started_at = Instant::now();
        if let Some(metrics) = &self.metrics {
            metrics.job_wait_time(started_at.saturating_duration_since(enqueued_at));
        }

        let metrics = self.metrics.clone();
        self.running.spawn(async move {
            // Panic isolation: a panicking callback must not poison the drain
            // loop, and its slot must still be released.
            let result = std::panic::AssertUnwindSafe(async move { payload().await })
                .catch_unwind()
                .await;

            let outcome = match result {
                Ok(callback_result) => Outcome::from(callback_result),
                Err(panic_info) => {
                    let message = panic_message(panic_info);
                    error!(job_id = id, panic_msg = %message, "validation callback panicked");
                    Outcome::InternalError(message)
                }
            };

            if let Some(metrics) = &metrics {
                metrics.job_run_time(started_at.elapsed());
            }
            let _ = outcome_tx.send(outcome);
        });
    }

    /// Cancellation: settle every buffered and in-transit job as `Cancelled`
    /// without invoking it, then let in-flight work run to completion.
    async fn cancel_pending(&mut self) {
        info!(
            buffered = self.buffer.len(),
            in_flight = self.limiter.in_flight(),
            "queue cancelled"
        );
        while let Some(job) = self.buffer.take_next() {
            job.settle(Outcome::Cancelled);
        }
        self.observe_length();

        // Close the mailbox, then settle whatever was already in transit
        self.rx.close();
        while let Ok(job) = self.rx.try_recv() {
            job.settle(Outcome::Cancelled);
        }

        while self.running.join_next().await.is_some() {
            self.limiter.release();
        }
    }

    /// All handles are gone: keep draining until buffer and slots are empty,
    /// still honoring cancellation.
    async fn drain_remaining(&mut self) {
        loop {
            self.fill_slots();
            if self.running.is_empty() {
                break;
            }
            tokio::select! {
                Some(_joined) = self.running.join_next() => {
                    self.limiter.release();
                }
                _ = self.cancel.cancelled() => {
                    self.cancel_pending().await;
                    return;
                }
            }
        }
    }

    fn observe_length(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.queue_length(self.buffer.len());
        }
    }
}

/// Extract a readable message from a caught panic payload.
fn panic_message(panic_info: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
