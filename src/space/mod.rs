//! Allocation accounting
//!
//! With the `jemalloc` feature the allocator's own statistics are read
//! through `tikv-jemalloc-ctl`, in place of a collector's statistics.

#[cfg(feature = "jemalloc")]
mod jemalloc;

#[cfg(feature = "jemalloc")]
pub use jemalloc::{ThreadAllocCounter, ThreadAllocDelta};

const MB: usize = 1024 * 1024;

/// Snapshot of allocator statistics, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Bytes the calling thread has allocated since it started
    pub thread_allocated: u64,

    /// Bytes currently allocated by the application
    pub allocated: usize,

    /// Bytes in pages backing live allocations
    pub active: usize,

    /// Bytes in physically resident pages, metadata included
    pub resident: usize,

    /// Bytes mapped by the allocator
    pub mapped: usize,
}

impl AllocStats {
    /// Trailing statistics block printed after a run
    pub fn report(&self) -> String {
        format!(
            "{:8} MB allocated by benchmark thread\n{:8} MB allocated\n{:8} MB active\n{:8} MB resident\n{:8} MB mapped\n",
            self.thread_allocated / MB as u64,
            self.allocated / MB,
            self.active / MB,
            self.resident / MB,
            self.mapped / MB
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_layout() {
        let stats = AllocStats {
            thread_allocated: 5000 * MB as u64 + 3,
            allocated: 3 * MB,
            active: 4 * MB,
            resident: 96 * MB + 17,
            mapped: 128 * MB,
        };
        assert_eq!(
            stats.report(),
            "    5000 MB allocated by benchmark thread\n       3 MB allocated\n       4 MB active\n      96 MB resident\n     128 MB mapped\n"
        );
    }

    #[test]
    fn test_report_rounds_down() {
        let stats = AllocStats {
            allocated: MB - 1,
            ..AllocStats::default()
        };
        assert!(stats.report().contains("       0 MB allocated\n"));
    }
}
