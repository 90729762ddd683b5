// Concurrency cap properties

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use admitq_core::{
    cancellation_channel, JobQueue, OrderingPolicy, Outcome, QueueConfig,
};
use tokio::sync::Semaphore;
use tokio::time::{sleep, timeout};

const WAIT: Duration = Duration::from_secs(2);

async fn wait_until(probe: impl Fn() -> bool) {
    timeout(WAIT, async {
        while !probe() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn test_cap_is_a_hard_ceiling() {
    let (_source, token) = cancellation_channel();
    let config = QueueConfig::new(32, OrderingPolicy::OldestFirst).with_max_concurrency(4);
    let handle = JobQueue::spawn(config, token, None).unwrap();

    let gate = Arc::new(Semaphore::new(0));
    let started = Arc::new(AtomicUsize::new(0));
    let current = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let mut tickets = Vec::new();
    for _ in 0..10 {
        let gate = Arc::clone(&gate);
        let started = Arc::clone(&started);
        let current = Arc::clone(&current);
        let peak = Arc::clone(&peak);
        tickets.push(handle.submit(move || async move {
            started.fetch_add(1, Ordering::SeqCst);
            let now_running = current.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now_running, Ordering::SeqCst);
            // forget() consumes the permit so releases do not cascade
            gate.acquire().await.unwrap().forget();
            current.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }));
    }

    // Exactly four run; the other six start only as slots free
    wait_until(|| started.load(Ordering::SeqCst) == 4).await;
    sleep(Duration::from_millis(50)).await;
    assert_eq!(started.load(Ordering::SeqCst), 4);
    assert_eq!(current.load(Ordering::SeqCst), 4);

    gate.add_permits(10);
    for ticket in tickets {
        assert_eq!(timeout(WAIT, ticket).await.unwrap(), Outcome::Success(()));
    }
    assert_eq!(started.load(Ordering::SeqCst), 10);
    assert_eq!(peak.load(Ordering::SeqCst), 4, "cap exceeded");
}

#[tokio::test]
async fn test_serial_queue_never_overlaps_jobs() {
    let (_source, token) = cancellation_channel();
    let config = QueueConfig::new(16, OrderingPolicy::OldestFirst);
    let handle = JobQueue::spawn(config, token, None).unwrap();

    let current = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut tickets = Vec::new();
    for label in ["first", "second", "third"] {
        let current = Arc::clone(&current);
        let peak = Arc::clone(&peak);
        let order = Arc::clone(&order);
        tickets.push(handle.submit(move || async move {
            let now_running = current.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now_running, Ordering::SeqCst);
            sleep(Duration::from_millis(10)).await;
            order.lock().unwrap().push(label);
            current.fetch_sub(1, Ordering::SeqCst);
            Ok(label)
        }));
    }

    for ticket in tickets {
        assert!(timeout(WAIT, ticket).await.unwrap().is_success());
    }
    assert_eq!(peak.load(Ordering::SeqCst), 1, "serial queue overlapped jobs");
    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_slots_refill_as_jobs_finish() {
    let (_source, token) = cancellation_channel();
    let config = QueueConfig::new(16, OrderingPolicy::OldestFirst).with_max_concurrency(2);
    let handle = JobQueue::spawn(config, token, None).unwrap();

    let started = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Semaphore::new(0));

    let mut tickets = Vec::new();
    for _ in 0..6 {
        let started = Arc::clone(&started);
        let gate = Arc::clone(&gate);
        tickets.push(handle.submit(move || async move {
            started.fetch_add(1, Ordering::SeqCst);
            gate.acquire().await.unwrap().forget();
            Ok(())
        }));
    }

    wait_until(|| started.load(Ordering::SeqCst) == 2).await;

    // Releasing one job admits exactly one more
    gate.add_permits(1);
    wait_until(|| started.load(Ordering::SeqCst) == 3).await;
    sleep(Duration::from_millis(20)).await;
    assert_eq!(started.load(Ordering::SeqCst), 3);

    gate.add_permits(5);
    for ticket in tickets {
        assert!(timeout(WAIT, ticket).await.unwrap().is_success());
    }
}
