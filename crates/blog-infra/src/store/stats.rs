use std::sync::atomic::{AtomicU64, Ordering};

use blog_core::ports::StoreStats;

/// Lock-free counters behind [`StoreStats`].
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    loads: AtomicU64,
    saves: AtomicU64,
    load_failures: AtomicU64,
    rejected_writes: AtomicU64,
    write_failures: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn save(&self) {
        self.saves.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn load_failures(&self, count: u64) {
        self.load_failures.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn rejected_write(&self) {
        self.rejected_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StoreStats {
        StoreStats {
            loads: self.loads.load(Ordering::Relaxed),
            saves: self.saves.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            rejected_writes: self.rejected_writes.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}
