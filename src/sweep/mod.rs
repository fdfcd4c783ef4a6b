//! Depth planning for a benchmark run
//!
//! Turns the workload parameter into the stretch depth, the long-lived depth
//! and the list of swept depths with their iteration counts.

mod plan;

pub use plan::{DepthPlan, SweepEntry, SweepIter};

/// Shallowest swept depth
pub const MIN_DEPTH: u32 = 4;

/// Deepest supported `max_depth`
///
/// Keeps `iterations * nodes` for the shallowest sweep entry and the stretch
/// checksum inside `u64`.
pub const MAX_DEPTH: u32 = 58;

/// Gap between swept depths
pub const DEPTH_STEP: u32 = 2;
