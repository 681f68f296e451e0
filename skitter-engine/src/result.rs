use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub url: String,
    pub body: String,
    pub links: Vec<String>,
}

impl CrawlResult {
    pub fn new(url: String, body: String, links: Vec<String>) -> Self {
        Self { url, body, links }
    }
}
