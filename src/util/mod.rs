//! Utility functions

use std::time::{Duration, Instant};

/// Run `f` and return its result with the wall time it took
#[inline]
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Throughput in nodes per second, 0 for an empty interval
pub fn nodes_per_second(nodes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        nodes as f64 / secs
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_returns_value() {
        let (value, elapsed) = timed(|| 40 + 2);
        assert_eq!(value, 42);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_nodes_per_second() {
        assert_eq!(nodes_per_second(1000, Duration::from_millis(500)), 2000.0);
        assert_eq!(nodes_per_second(1000, Duration::ZERO), 0.0);
    }
}
