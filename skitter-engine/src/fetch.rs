use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{CrawlError, Result};
use crate::visited::VisitedSet;

/// The body of a URL plus every outbound link found on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    pub body: String,
    #[serde(default)]
    pub links: Vec<String>,
}

impl FetchedPage {
    pub fn new(body: String, links: Vec<String>) -> Self {
        Self { body, links }
    }
}

/// Resolves a URL to its content and outbound links.
///
/// URLs are opaque keys compared by exact string equality; implementations
/// must not normalize them.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        (**self).fetch(url).await
    }
}

/// Couples admission to the fetch attempt: a URL is claimed in the
/// [`VisitedSet`] immediately before the inner fetch runs, so branches
/// discovering the same URL race on the claim, never on the fetch itself.
///
/// A claim is not released when the inner fetch fails; the URL stays
/// visited for the rest of the run.
pub struct DedupFetcher<F> {
    visited: Arc<VisitedSet>,
    inner: F,
}

impl<F: Fetcher> DedupFetcher<F> {
    pub fn new(visited: Arc<VisitedSet>, inner: F) -> Self {
        Self { visited, inner }
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for DedupFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        if !self.visited.try_admit(url).await {
            return Err(CrawlError::AlreadyVisited(url.to_string()));
        }
        self.inner.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::StaticFetcher;
    use std::collections::HashMap;

    fn single_page_fetcher(url: &str) -> StaticFetcher {
        let mut pages = HashMap::new();
        pages.insert(
            url.to_string(),
            FetchedPage::new("A page".to_string(), Vec::new()),
        );
        StaticFetcher::new(pages)
    }

    #[tokio::test]
    async fn test_second_fetch_rejected() {
        let visited = Arc::new(VisitedSet::new());
        let fetcher = DedupFetcher::new(visited, single_page_fetcher("https://example.org/"));

        assert!(fetcher.fetch("https://example.org/").await.is_ok());

        match fetcher.fetch("https://example.org/").await {
            Err(CrawlError::AlreadyVisited(url)) => assert_eq!(url, "https://example.org/"),
            other => panic!("expected AlreadyVisited, got {:?}", other.map(|p| p.body)),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_claim() {
        let visited = Arc::new(VisitedSet::new());
        let fetcher = DedupFetcher::new(
            visited.clone(),
            single_page_fetcher("https://example.org/"),
        );

        match fetcher.fetch("https://example.org/missing").await {
            Err(CrawlError::NotFound(url)) => assert_eq!(url, "https://example.org/missing"),
            other => panic!("expected NotFound, got {:?}", other.map(|p| p.body)),
        }

        // The failed URL stays claimed, so a sibling retry is rejected
        // instead of re-fetched.
        assert!(matches!(
            fetcher.fetch("https://example.org/missing").await,
            Err(CrawlError::AlreadyVisited(_))
        ));
        assert!(visited.contains("https://example.org/missing").await);
    }
}
