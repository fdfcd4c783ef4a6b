use std::collections::HashSet;

use blake3::hash;
use treebench::{BenchConfig, TreeBenchmark};

#[test]
fn benchmark_output_is_deterministic() {
    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let config = BenchConfig::for_workload(7).expect("workload in range");
        let mut out = Vec::new();
        let report = TreeBenchmark::new(config)
            .run(&mut out)
            .expect("run succeeds");

        assert_eq!(report.sweeps.len(), 2);
        fingerprints.insert(hash(&out));
    }

    assert_eq!(fingerprints.len(), 1, "outputs diverged across runs");
}
