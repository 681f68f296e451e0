use std::collections::HashSet;
use tokio::sync::Mutex;

/// Shared set of URLs already claimed by some crawl branch.
///
/// The check and the insert in [`try_admit`](Self::try_admit) happen inside
/// one critical section, so of any number of concurrent claims on the same
/// URL exactly one succeeds. Membership is append-only; build a fresh set
/// for each crawl run.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the caller. Returns false if an earlier (or
    /// concurrent) caller already claimed it.
    pub async fn try_admit(&self, url: &str) -> bool {
        let mut visited = self.inner.lock().await;
        if visited.contains(url) {
            false
        } else {
            visited.insert(url.to_string());
            true
        }
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.inner.lock().await.contains(url)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
