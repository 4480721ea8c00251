use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Post, PostId};
use crate::error::StoreError;

/// The full set of posts keyed by id; the unit of persistence.
///
/// Backed by a `BTreeMap` so the encoded document is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostCollection(BTreeMap<PostId, Post>);

impl PostCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.0.get(id)
    }

    pub fn get_mut(&mut self, id: &PostId) -> Option<&mut Post> {
        self.0.get_mut(id)
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.0.contains_key(id)
    }

    pub fn insert(&mut self, id: PostId, post: Post) -> Option<Post> {
        self.0.insert(id, post)
    }

    pub fn remove(&mut self, id: &PostId) -> Option<Post> {
        self.0.remove(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PostId, &Post)> {
        self.0.iter()
    }

    /// Check that every record is a well-formed post.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (id, post) in &self.0 {
            let blank = post.blank_fields();
            if !blank.is_empty() {
                return Err(StoreError::Malformed(format!(
                    "post {} has blank {}",
                    id,
                    blank.join(", ")
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(PostId, Post)> for PostCollection {
    fn from_iter<I: IntoIterator<Item = (PostId, Post)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PostCollection {
    type Item = (PostId, Post);
    type IntoIter = std::collections::btree_map::IntoIter<PostId, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
