//! jemalloc statistics
//!
//! Only meaningful when `tikv_jemallocator::Jemalloc` is the global
//! allocator; otherwise jemalloc sees none of the program's allocations.

use std::fmt;

use tikv_jemalloc_ctl::thread::{allocatedp, deallocatedp, ThreadLocal};
use tikv_jemalloc_ctl::{epoch, stats};

use super::AllocStats;
use crate::BenchError;

impl AllocStats {
    /// Refresh jemalloc's counters and read them
    pub fn sample() -> Result<Self, BenchError> {
        epoch::advance()?;

        Ok(Self {
            thread_allocated: allocatedp::mib()?.read()?.get(),
            allocated: stats::allocated::read()?,
            active: stats::active::read()?,
            resident: stats::resident::read()?,
            mapped: stats::mapped::read()?,
        })
    }
}

/// Per-thread byte counters
///
/// Reads are exact and unaffected by other threads, so tests can assert
/// precise byte counts for a build.
pub struct ThreadAllocCounter {
    allocated: ThreadLocal<u64>,
    deallocated: ThreadLocal<u64>,
}

impl fmt::Debug for ThreadAllocCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadAllocCounter")
            .field("totals", &self.totals())
            .finish()
    }
}

/// Bytes moved on one thread between two readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadAllocDelta {
    /// Bytes allocated
    pub allocated: u64,
    /// Bytes released
    pub deallocated: u64,
}

impl ThreadAllocCounter {
    /// Counters for the calling thread
    ///
    /// The handle must only be read on the thread that created it.
    pub fn new() -> Result<Self, BenchError> {
        Ok(Self {
            allocated: allocatedp::mib()?.read()?,
            deallocated: deallocatedp::mib()?.read()?,
        })
    }

    /// Current cumulative totals
    pub fn totals(&self) -> ThreadAllocDelta {
        ThreadAllocDelta {
            allocated: self.allocated.get(),
            deallocated: self.deallocated.get(),
        }
    }

    /// Bytes moved since `earlier`
    pub fn since(&self, earlier: &ThreadAllocDelta) -> ThreadAllocDelta {
        let now = self.totals();
        ThreadAllocDelta {
            allocated: now.allocated - earlier.allocated,
            deallocated: now.deallocated - earlier.deallocated,
        }
    }
}
