use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{CrawlError, Result};
use crate::fetch::{FetchedPage, Fetcher};

/// In-memory page graph used to simulate fetches.
///
/// Lookup is by exact URL string. Unknown URLs fail with
/// [`CrawlError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, FetchedPage>,
}

impl StaticFetcher {
    pub fn new(pages: HashMap<String, FetchedPage>) -> Self {
        Self { pages }
    }

    /// Parses a page graph from JSON of the form
    /// `{"<url>": {"body": "...", "links": ["<url>", ...]}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let pages: HashMap<String, FetchedPage> = serde_json::from_str(json)?;
        Ok(Self { pages })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The built-in demo graph: four pages linking into each other, with
    /// cycles back to the root.
    pub fn sample() -> Self {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.org/".to_string(),
            FetchedPage::new(
                "Example Domain".to_string(),
                vec![
                    "https://example.org/docs/".to_string(),
                    "https://example.org/about/".to_string(),
                ],
            ),
        );
        pages.insert(
            "https://example.org/docs/".to_string(),
            FetchedPage::new(
                "Documentation".to_string(),
                vec![
                    "https://example.org/".to_string(),
                    "https://example.org/about/".to_string(),
                    "https://example.org/docs/api/".to_string(),
                    "https://example.org/docs/guide/".to_string(),
                ],
            ),
        );
        pages.insert(
            "https://example.org/docs/api/".to_string(),
            FetchedPage::new(
                "API Reference".to_string(),
                vec![
                    "https://example.org/".to_string(),
                    "https://example.org/docs/".to_string(),
                ],
            ),
        );
        pages.insert(
            "https://example.org/docs/guide/".to_string(),
            FetchedPage::new(
                "User Guide".to_string(),
                vec![
                    "https://example.org/".to_string(),
                    "https://example.org/docs/".to_string(),
                ],
            ),
        );
        Self { pages }
    }

    pub fn pages(&self) -> &HashMap<String, FetchedPage> {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| CrawlError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_known_url() {
        let fetcher = StaticFetcher::sample();

        let page = fetcher.fetch("https://example.org/").await.unwrap();
        assert_eq!(page.body, "Example Domain");
        assert_eq!(page.links.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_unknown_url() {
        let fetcher = StaticFetcher::sample();

        match fetcher.fetch("https://example.org/nope").await {
            Err(CrawlError::NotFound(url)) => assert_eq!(url, "https://example.org/nope"),
            other => panic!("expected NotFound, got {:?}", other.map(|p| p.body)),
        }
    }

    #[tokio::test]
    async fn test_no_normalization() {
        let fetcher = StaticFetcher::sample();

        // Equality is exact; a missing trailing slash is a different key.
        assert!(fetcher.fetch("https://example.org").await.is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "a": {"body": "Page A", "links": ["b"]},
            "b": {"body": "Page B"}
        }"#;

        let fetcher = StaticFetcher::from_json(json).unwrap();
        assert_eq!(fetcher.len(), 2);
        assert_eq!(fetcher.pages()["a"].links, vec!["b".to_string()]);
        // "links" is optional in the file format.
        assert!(fetcher.pages()["b"].links.is_empty());
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            StaticFetcher::from_json("{not json"),
            Err(CrawlError::Parse(_))
        ));
    }
}
