use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque post identifier. Stored as the key of the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Generate a fresh random identifier (UUID v4, hyphenated).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Post entity - one blog entry. The id lives in the owning collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub author: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub likes: u64,
}

impl Post {
    /// Create a new post with no likes.
    pub fn new(author: String, title: String, content: String) -> Self {
        Self {
            author,
            title,
            content,
            likes: 0,
        }
    }

    /// Names of the text fields that are blank.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("author", &self.author),
            ("title", &self.title),
            ("content", &self.content),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_well_formed(&self) -> bool {
        self.blank_fields().is_empty()
    }
}
