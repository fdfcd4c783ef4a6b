use std::fs;
use std::path::Path;

use treebench::{BenchConfig, TreeBenchmark};

/// Contents of `tests/snapshots/<name>`
#[allow(dead_code)]
pub fn expected_output(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read {}: {}", path.display(), err))
        .replace("\r\n", "\n")
}

/// Run the benchmark for `n` and return everything it printed
#[allow(dead_code)]
pub fn run_to_string(n: i64) -> String {
    let config = BenchConfig::for_workload(n).expect("workload in range");
    let mut out = Vec::new();
    TreeBenchmark::new(config)
        .run(&mut out)
        .expect("benchmark run succeeds");
    String::from_utf8(out).expect("output is UTF-8")
}
