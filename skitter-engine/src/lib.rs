pub mod crawler;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod result;
pub mod visited;
pub mod waitgroup;

pub use crawler::{Crawler, crawl};
pub use dataset::StaticFetcher;
pub use error::CrawlError;
pub use fetch::{DedupFetcher, FetchedPage, Fetcher};
pub use result::CrawlResult;
pub use visited::VisitedSet;
pub use waitgroup::WaitGroup;
