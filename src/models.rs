use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dom::NodeId;
use crate::types::SearchItem;

/// One repository from a search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryHit {
    pub name: String,
    pub owner_login: String,
    pub star_count: u64,
}

impl RepositoryHit {
    pub fn new(name: impl Into<String>, owner_login: impl Into<String>, star_count: u64) -> Self {
        Self {
            name: name.into(),
            owner_login: owner_login.into(),
            star_count,
        }
    }
}

impl From<SearchItem> for RepositoryHit {
    fn from(item: SearchItem) -> Self {
        Self {
            name: item.name,
            owner_login: item.owner.login,
            star_count: item.stargazers_count,
        }
    }
}

/// Trimmed contents of the search box. The empty query means "no query".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn from_input(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate node as it currently sits in the candidate container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    pub node: NodeId,
    pub name: String,
    pub owner: String,
    pub stars: String,
}

/// A saved card and the id of its remove control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedCardView {
    pub card: NodeId,
    pub remove_control: Option<NodeId>,
    pub lines: Vec<String>,
}

/// Read-only picture of the widget after a document change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WidgetSnapshot {
    pub input: String,
    pub candidates: Vec<CandidateView>,
    pub saved: Vec<SavedCardView>,
}

impl WidgetSnapshot {
    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name.as_str()).collect()
    }
}
