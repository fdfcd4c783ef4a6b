//! Depth plan derived from the workload parameter

use std::fmt;

use super::{DEPTH_STEP, MAX_DEPTH, MIN_DEPTH};
use crate::BenchError;

/// Depths for one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthPlan {
    /// Depth of the long-lived tree and of the deepest sweep entry bound
    pub max_depth: u32,

    /// One deeper than `max_depth`
    pub stretch_depth: u32,
}

impl DepthPlan {
    /// Plan for workload `n`
    ///
    /// `max_depth = max(n, MIN_DEPTH + 2)`; negative `n` clamps like any
    /// other small value.
    pub fn new(n: i64) -> Result<Self, BenchError> {
        Self::checked(n).ok_or(BenchError::DepthTooLarge {
            depth: n,
            limit: MAX_DEPTH,
        })
    }

    /// Same derivation as [`DepthPlan::new`], `None` above [`MAX_DEPTH`]
    pub const fn checked(n: i64) -> Option<Self> {
        let floor = (MIN_DEPTH + DEPTH_STEP) as i64;
        let max_depth = if n < floor { floor } else { n };

        if max_depth > MAX_DEPTH as i64 {
            return None;
        }

        // Bounded by MAX_DEPTH above.
        let max_depth = max_depth as u32;
        Some(Self {
            max_depth,
            stretch_depth: max_depth + 1,
        })
    }

    /// Swept depths in ascending order
    pub fn sweep(&self) -> SweepIter {
        SweepIter {
            next_depth: MIN_DEPTH,
            max_depth: self.max_depth,
        }
    }

    /// Number of sweep entries: `floor((max_depth - MIN_DEPTH) / 2) + 1`
    pub fn sweep_len(&self) -> usize {
        ((self.max_depth - MIN_DEPTH) / DEPTH_STEP) as usize + 1
    }
}

impl fmt::Display for DepthPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_depth={} stretch_depth={} sweep={}..={} step {}",
            self.max_depth, self.stretch_depth, MIN_DEPTH, self.max_depth, DEPTH_STEP
        )
    }
}

/// One swept depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SweepEntry {
    /// Tree depth
    pub depth: u32,

    /// Trees built at this depth: `2^(max_depth - depth + MIN_DEPTH)`
    pub iterations: u64,
}

/// Iterator over [`SweepEntry`] values
#[derive(Debug, Clone)]
pub struct SweepIter {
    next_depth: u32,
    max_depth: u32,
}

impl Iterator for SweepIter {
    type Item = SweepEntry;

    fn next(&mut self) -> Option<SweepEntry> {
        if self.next_depth > self.max_depth {
            return None;
        }

        let depth = self.next_depth;
        self.next_depth += DEPTH_STEP;

        Some(SweepEntry {
            depth,
            iterations: 1u64 << (self.max_depth - depth + MIN_DEPTH),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next_depth > self.max_depth {
            0
        } else {
            ((self.max_depth - self.next_depth) / DEPTH_STEP) as usize + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SweepIter {}
