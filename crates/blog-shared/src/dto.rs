//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to create or update a post. Absent fields fall back to defaults
/// where one exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A single post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub likes: u64,
}

/// Every stored post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total: usize,
}
