//! In-memory post store - used when no storage file is wanted, and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::StoreError;
use blog_core::domain::PostCollection;
use blog_core::ports::{PostStore, StoreStats};

use super::stats::StatsRecorder;

/// In-memory post store guarded by an async RwLock.
///
/// Applies the same write validation as the file store.
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    posts: RwLock<PostCollection>,
    stats: StatsRecorder,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::with_posts(PostCollection::new())
    }

    pub fn with_posts(posts: PostCollection) -> Self {
        Self {
            posts: RwLock::new(posts),
            stats: StatsRecorder::default(),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn load(&self) -> PostCollection {
        self.stats.load();
        self.posts.read().await.clone()
    }

    async fn save(&self, posts: &PostCollection) -> Result<(), StoreError> {
        if let Err(e) = posts.validate() {
            tracing::error!(error = %e, "Refusing to store malformed posts");
            self.stats.rejected_write();
            return Err(e);
        }

        *self.posts.write().await = posts.clone();
        self.stats.save();
        Ok(())
    }

    fn stats(&self) -> StoreStats {
        self.stats.snapshot()
    }
}
