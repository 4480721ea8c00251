use async_trait::async_trait;
use serde::Serialize;

use crate::domain::PostCollection;
use crate::error::StoreError;

/// Post store trait - whole-collection persistence.
///
/// Reads and writes always cover the entire collection.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Load the full collection.
    ///
    /// Never fails: a missing, unreadable or malformed document is logged,
    /// counted in [`StoreStats::load_failures`] and yields an empty collection.
    async fn load(&self) -> PostCollection;

    /// Replace the stored collection.
    ///
    /// A collection holding a malformed record is rejected before anything
    /// is written, so the last good state survives.
    async fn save(&self, posts: &PostCollection) -> Result<(), StoreError>;

    /// Get store statistics.
    fn stats(&self) -> StoreStats;
}

/// Store statistics. Makes fail-soft recoveries observable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub loads: u64,
    pub saves: u64,
    pub load_failures: u64,
    pub rejected_writes: u64,
    pub write_failures: u64,
}
