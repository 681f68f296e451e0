use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Counter of outstanding crawl tasks, with a blocking wait for zero.
///
/// Call [`add`](Self::add) before spawning the task it accounts for and
/// [`done`](Self::done) after that task has fully returned. In that order
/// the count can never dip to zero while a registration is still pending,
/// so a waiter woken by [`wait`](Self::wait) knows the whole traversal is
/// finished.
#[derive(Clone, Debug, Default)]
pub struct WaitGroup {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    count: AtomicUsize,
    zero: Notify,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, n: usize) {
        self.inner.count.fetch_add(n, Ordering::AcqRel);
    }

    pub fn done(&self) {
        let previous = self.inner.count.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "done() called more times than add()");
        if previous == 1 {
            // Store a permit for the waiter even if it has not registered
            // yet; notified() consumes it on the next poll.
            self.inner.zero.notify_one();
        }
    }

    pub fn count(&self) -> usize {
        self.inner.count.load(Ordering::Acquire)
    }

    /// Waits until the count reaches zero. Returns immediately if it
    /// already has.
    pub async fn wait(&self) {
        loop {
            if self.count() == 0 {
                // Hand the permit along so every waiter observes zero.
                self.inner.zero.notify_one();
                return;
            }
            self.inner.zero.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_immediately_at_zero() {
        let wg = WaitGroup::new();
        wg.wait().await;
        assert_eq!(wg.count(), 0);
    }

    #[tokio::test]
    async fn test_wait_blocks_until_done() {
        let wg = WaitGroup::new();
        wg.add(1);

        let waiter = wg.clone();
        let handle = tokio::spawn(async move {
            waiter.wait().await;
            waiter.count()
        });

        // The waiter must not finish while a task is outstanding.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        wg.done();
        assert_eq!(handle.await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_add_done_stress() {
        let wg = WaitGroup::new();
        let mut handles = Vec::new();

        for _ in 0..200 {
            wg.add(1);
            let wg = wg.clone();
            handles.push(tokio::spawn(async move {
                tokio::task::yield_now().await;
                wg.done();
            }));
        }

        wg.wait().await;
        assert_eq!(wg.count(), 0);

        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_multiple_waiters_all_wake() {
        let wg = WaitGroup::new();
        wg.add(1);

        let mut waiters = Vec::new();
        for _ in 0..5 {
            let wg = wg.clone();
            waiters.push(tokio::spawn(async move { wg.wait().await }));
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
        wg.done();

        for waiter in waiters {
            waiter.await.unwrap();
        }
    }

    /// Registering a child before its parent finishes keeps the count away
    /// from zero, even though the parent's done() runs in between.
    #[tokio::test]
    async fn test_no_transient_zero_when_add_precedes_done() {
        let wg = WaitGroup::new();
        wg.add(1);
        wg.add(1); // child registered by the parent
        wg.done(); // parent returns
        assert_eq!(wg.count(), 1);
        wg.done(); // child returns
        wg.wait().await;
    }
}
