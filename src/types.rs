use serde::Deserialize;

// GitHub search API response structures

/// Envelope of `GET /search/repositories`. Items stay untyped until the
/// result list has been truncated, so a bad entry past the cut-off is ignored.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub name: String,
    pub owner: SearchItemOwner,
    pub stargazers_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchItemOwner {
    pub login: String,
}
