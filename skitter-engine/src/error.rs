use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("already fetched {0}")]
    AlreadyVisited(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
