//! # Binary-trees allocation benchmark
//!
//! Stresses the allocator with a fixed, reproducible workload: perfect
//! binary trees are built one heap node at a time, read once by a
//! node-count checksum and dropped, while one long-lived tree stays
//! resident for the whole run.
//!
//! ## Run shape
//!
//! 1. **Stretch tree**: one tree at `max_depth + 1`, checked and released
//! 2. **Long-lived tree**: one tree at `max_depth`, kept until the end
//! 3. **Depth sweep**: for depths `4, 6, ..= max_depth`, build and check
//!    `2^(max_depth - depth + 4)` transient trees
//! 4. **Long-lived check**: the retained tree is checked last
//!
//! ## Usage Example
//!
//! ```no_run
//! use treebench::{BenchConfig, TreeBenchmark};
//!
//! let config = BenchConfig::for_workload(10)?;
//! let report = TreeBenchmark::new(config).run(&mut std::io::stdout())?;
//! assert_eq!(report.stretch.check, 4095);
//! # Ok::<(), treebench::BenchError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod space;      // Allocation accounting
pub mod sweep;      // Depth planning
pub mod tree;       // Tree construction and checksums
pub mod util;       // Helper functions

pub use space::AllocStats;
pub use sweep::{DepthPlan, SweepEntry, MIN_DEPTH};
pub use tree::{build, checksum, Tree};

use std::fmt;
use std::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

/// Workload used when none is given or it cannot be parsed
pub const DEFAULT_N: i64 = 21;

/// Errors that can occur during a benchmark run
#[derive(Error, Debug)]
pub enum BenchError {
    /// Requested depth would overflow the checksum arithmetic
    #[error("Depth {depth} exceeds supported maximum {limit}")]
    DepthTooLarge {
        /// Depth that was requested
        depth: i64,
        /// Largest supported depth
        limit: u32,
    },

    /// A tree did not have the node count its depth implies
    #[error("Checksum mismatch at depth {depth}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Depth of the offending tree
        depth: u32,
        /// `2^(depth+1) - 1`, times the iteration count for sweep lines
        expected: u64,
        /// Value actually computed
        actual: u64,
    },

    /// jemalloc statistics could not be read
    #[cfg(feature = "jemalloc")]
    #[error("Failed to read allocator statistics: {0}")]
    Stats(#[from] tikv_jemalloc_ctl::Error),

    /// Writing a report line failed
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse the workload argument
///
/// Absent or unparsable input falls back to [`DEFAULT_N`]. Negative values
/// are kept; [`DepthPlan`] clamps them.
pub fn parse_workload(arg: Option<&str>) -> i64 {
    match arg {
        None => DEFAULT_N,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(n) => n,
            Err(err) => {
                debug!(input = raw, %err, fallback = DEFAULT_N, "unparsable workload");
                DEFAULT_N
            }
        },
    }
}

/// Configuration parameters for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Workload parameter as given
    pub workload: i64,

    /// Depths derived from `workload`
    pub plan: DepthPlan,
}

impl BenchConfig {
    /// Configuration for workload `n`
    pub fn for_workload(n: i64) -> Result<Self, BenchError> {
        Ok(Self {
            workload: n,
            plan: DepthPlan::new(n)?,
        })
    }

    /// Configuration from the raw command-line argument
    pub fn from_arg(arg: Option<&str>) -> Result<Self, BenchError> {
        Self::for_workload(parse_workload(arg))
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            workload: DEFAULT_N,
            plan: DEFAULT_PLAN,
        }
    }
}

const DEFAULT_PLAN: DepthPlan = match DepthPlan::checked(DEFAULT_N) {
    Some(plan) => plan,
    None => panic!("default workload exceeds MAX_DEPTH"),
};

/// Checksum of a single tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeCheck {
    /// Tree depth
    pub depth: u32,
    /// Node count
    pub check: u64,
    /// Build and check time for the stretch tree, check time only for the
    /// long-lived tree
    pub elapsed: Duration,
}

/// Summed checksums for one swept depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Trees built
    pub iterations: u64,
    /// Tree depth
    pub depth: u32,
    /// Sum of all checksums
    pub check: u64,
    /// Time for the whole batch
    pub elapsed: Duration,
}

/// One line of benchmark output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine {
    /// Stretch tree result
    Stretch {
        /// Tree depth
        depth: u32,
        /// Node count
        check: u64,
    },
    /// Depth sweep result
    Sweep {
        /// Trees built
        iterations: u64,
        /// Tree depth
        depth: u32,
        /// Summed node count
        check: u64,
    },
    /// Long-lived tree result
    LongLived {
        /// Tree depth
        depth: u32,
        /// Node count
        check: u64,
    },
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ReportLine::Stretch { depth, check } => {
                write!(f, "stretch tree of depth {}\t check: {}", depth, check)
            }
            ReportLine::Sweep {
                iterations,
                depth,
                check,
            } => write!(f, "{}\t trees of depth {}\t check: {}", iterations, depth, check),
            ReportLine::LongLived { depth, check } => {
                write!(f, "long lived tree of depth {}\t check: {}", depth, check)
            }
        }
    }
}

/// Result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchReport {
    /// Depths the run used
    pub plan: DepthPlan,
    /// Stretch tree
    pub stretch: TreeCheck,
    /// Time to build the long-lived tree
    pub long_lived_build: Duration,
    /// One entry per swept depth, ascending
    pub sweeps: Vec<SweepResult>,
    /// Long-lived tree, checked at the end
    pub long_lived: TreeCheck,
    /// Wall time of the whole run
    pub total: Duration,
}

impl BenchReport {
    /// Output lines in print order
    pub fn lines(&self) -> Vec<ReportLine> {
        let mut lines = Vec::with_capacity(self.sweeps.len() + 2);
        lines.push(ReportLine::Stretch {
            depth: self.stretch.depth,
            check: self.stretch.check,
        });
        lines.extend(self.sweeps.iter().map(|s| ReportLine::Sweep {
            iterations: s.iterations,
            depth: s.depth,
            check: s.check,
        }));
        lines.push(ReportLine::LongLived {
            depth: self.long_lived.depth,
            check: self.long_lived.check,
        });
        lines
    }

    /// Every node built during the run, long-lived tree included
    pub fn total_nodes(&self) -> u64 {
        self.stretch.check
            + self.long_lived.check
            + self.sweeps.iter().map(|s| s.check).sum::<u64>()
    }
}

/// Benchmark driver
#[derive(Debug)]
pub struct TreeBenchmark {
    config: BenchConfig,
}

impl TreeBenchmark {
    /// Create driver
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run the benchmark, writing each line to `out` as it is produced
    ///
    /// Order: stretch tree, sweep lines by ascending depth, long-lived tree.
    /// Allocation failure aborts the process; nothing here recovers from it.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<BenchReport, BenchError> {
        let plan = self.config.plan;
        debug!(%plan, workload = self.config.workload, "starting run");

        let start = Instant::now();

        // Stretch tree lives only inside this closure.
        let (check, elapsed) = util::timed(|| {
            let tree = build(plan.stretch_depth);
            checksum(black_box(&tree))
        });
        verify(plan.stretch_depth, 1, check)?;
        writeln!(
            out,
            "{}",
            ReportLine::Stretch {
                depth: plan.stretch_depth,
                check
            }
        )?;
        info!(depth = plan.stretch_depth, ?elapsed, "stretch tree");
        let stretch = TreeCheck {
            depth: plan.stretch_depth,
            check,
            elapsed,
        };

        let (long_lived_tree, long_lived_build) = util::timed(|| build(plan.max_depth));
        info!(depth = plan.max_depth, elapsed = ?long_lived_build, "long lived tree built");

        let mut sweeps = Vec::with_capacity(plan.sweep_len());
        for entry in plan.sweep() {
            let result = sweep_depth(entry);
            verify(result.depth, result.iterations, result.check)?;
            writeln!(
                out,
                "{}",
                ReportLine::Sweep {
                    iterations: result.iterations,
                    depth: result.depth,
                    check: result.check,
                }
            )?;
            info!(
                depth = result.depth,
                iterations = result.iterations,
                elapsed = ?result.elapsed,
                nodes_per_sec = util::nodes_per_second(result.check, result.elapsed),
                "depth swept"
            );
            sweeps.push(result);
        }

        let (check, elapsed) = util::timed(|| checksum(black_box(&long_lived_tree)));
        verify(plan.max_depth, 1, check)?;
        writeln!(
            out,
            "{}",
            ReportLine::LongLived {
                depth: plan.max_depth,
                check
            }
        )?;
        drop(long_lived_tree);

        let total = start.elapsed();
        info!(?total, "run complete");

        Ok(BenchReport {
            plan,
            stretch,
            long_lived_build,
            sweeps,
            long_lived: TreeCheck {
                depth: plan.max_depth,
                check,
                elapsed,
            },
            total,
        })
    }
}

/// Build and check `entry.iterations` trees, each dropped after its checksum
fn sweep_depth(entry: SweepEntry) -> SweepResult {
    let (check, elapsed) = util::timed(|| {
        let mut check = 0u64;
        for _ in 0..entry.iterations {
            let tree = build(entry.depth);
            check += checksum(black_box(&tree));
        }
        check
    });

    SweepResult {
        iterations: entry.iterations,
        depth: entry.depth,
        check,
        elapsed,
    }
}

fn verify(depth: u32, trees: u64, actual: u64) -> Result<(), BenchError> {
    let expected = trees * tree::expected_nodes(depth);
    if actual == expected {
        Ok(())
    } else {
        Err(BenchError::ChecksumMismatch {
            depth,
            expected,
            actual,
        })
    }
}
