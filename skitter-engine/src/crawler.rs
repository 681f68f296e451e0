use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::CrawlError;
use crate::fetch::{DedupFetcher, FetchedPage, Fetcher};
use crate::result::CrawlResult;
use crate::visited::VisitedSet;
use crate::waitgroup::WaitGroup;

pub const DEFAULT_BUFFER: usize = 32;

/// Depth-bounded concurrent traversal over a link graph.
///
/// Every page reachable from the seed spawns its own task, so fan-out is
/// unbounded; the depth limit is the only backpressure. Results arrive on
/// a bounded channel in no particular order across branches.
pub struct Crawler {
    max_depth: usize,
    buffer: usize,
}

impl Crawler {
    pub fn new() -> Self {
        Self {
            max_depth: 3,
            buffer: DEFAULT_BUFFER,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Capacity of the result channel. Clamped to at least 1.
    pub fn with_buffer(mut self, capacity: usize) -> Self {
        self.buffer = capacity.max(1);
        self
    }

    /// Starts the crawl and returns the stream of visited pages.
    ///
    /// Each reachable URL is fetched at most once and yields at most one
    /// result. The stream closes once every spawned branch has finished;
    /// dropping the receiver early prunes the remaining branches. Must be
    /// called from within a Tokio runtime.
    pub fn crawl<F>(&self, seed: &str, fetcher: F) -> mpsc::Receiver<CrawlResult>
    where
        F: Fetcher + 'static,
    {
        let (results, rx) = mpsc::channel(self.buffer);
        let visited = Arc::new(VisitedSet::new());
        let fetcher: Arc<dyn Fetcher> = Arc::new(DedupFetcher::new(visited.clone(), fetcher));
        let pending = WaitGroup::new();

        info!("Starting crawl of {} with max depth {}", seed, self.max_depth);

        spawn_visit(
            fetcher,
            seed.to_string(),
            self.max_depth,
            results.clone(),
            pending.clone(),
        );

        // Close the stream only after the last outstanding branch returns.
        // This task holds the original sender, so the receiver cannot see
        // the channel close before the wait finishes.
        tokio::spawn(async move {
            pending.wait().await;
            info!("Crawl complete. Visited {} pages", visited.len().await);
            drop(results);
        });

        rx
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

/// Crawls the graph reachable from `seed`, to at most `max_depth` hops.
///
/// `max_depth` of 0 yields an empty, immediately closed stream.
pub fn crawl<F>(seed: &str, max_depth: usize, fetcher: F) -> mpsc::Receiver<CrawlResult>
where
    F: Fetcher + 'static,
{
    Crawler::new().with_max_depth(max_depth).crawl(seed, fetcher)
}

/// Registers one unit of outstanding work, then spawns the visit task.
/// The registration must precede the spawn so the counter can never touch
/// zero while a branch is still queued.
fn spawn_visit(
    fetcher: Arc<dyn Fetcher>,
    url: String,
    depth: usize,
    results: mpsc::Sender<CrawlResult>,
    pending: WaitGroup,
) {
    pending.add(1);
    let group = pending.clone();
    tokio::spawn(async move {
        visit(fetcher, url, depth, results, pending).await;
        group.done();
    });
}

fn visit(
    fetcher: Arc<dyn Fetcher>,
    url: String,
    depth: usize,
    results: mpsc::Sender<CrawlResult>,
    pending: WaitGroup,
) -> BoxFuture<'static, ()> {
    async move {
        if depth == 0 {
            return;
        }

        debug!("Fetching {}", url);
        let FetchedPage { body, links } = match fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(CrawlError::AlreadyVisited(_)) => {
                debug!("Skipping {}, already fetched", url);
                return;
            }
            Err(e) => {
                warn!("Crawl error for {}: {}", url, e);
                return;
            }
        };

        debug!("Found {} ({} links)", url, links.len());

        // Publish before fanning out, so a page's result is on the stream
        // before any of its children are fetched. Blocks while the
        // consumer lags behind the buffer.
        let result = CrawlResult::new(url.clone(), body, links.clone());
        if results.send(result).await.is_err() {
            debug!("Result stream dropped, pruning at {}", url);
            return;
        }

        for link in links {
            spawn_visit(
                fetcher.clone(),
                link,
                depth - 1,
                results.clone(),
                pending.clone(),
            );
        }
    }
    .boxed()
}
