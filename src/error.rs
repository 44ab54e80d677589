use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoPinError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Search API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Invalid search endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Widget error: {0}")]
    Widget(String),
}

impl RepoPinError {
    /// True for the failures a search can end in: network, status, rate limit
    /// or an unreadable body.
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            RepoPinError::Network(_)
                | RepoPinError::Status { .. }
                | RepoPinError::RateLimited(_)
                | RepoPinError::MalformedBody(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RepoPinError>;
