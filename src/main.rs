use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use treebench::{BenchConfig, TreeBenchmark};

#[cfg(feature = "jemalloc")]
#[global_allocator]
static ALLOC: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "treebench",
    version,
    about = "Binary-trees allocation benchmark",
    long_about = "Builds, checksums and discards perfect binary trees to stress the allocator.\n\n\
                  Only the first argument is read; anything that is not an integer runs the \
                  default workload of 21. Exits 0 on completion and 1 if N is above 58, the \
                  deepest tree whose checksums fit in 64 bits, or if stdout cannot be written.\n\n\
                  Set RUST_LOG=info for per-phase timings on stderr."
)]
struct Cli {
    /// Workload size; the deepest swept tree has depth max(N, 6)
    #[arg(
        value_name = "N",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = BenchConfig::from_arg(cli.args.first().map(String::as_str))
        .context("invalid workload")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    TreeBenchmark::new(config)
        .run(&mut out)
        .context("benchmark run failed")?;

    #[cfg(feature = "alloc-stats")]
    {
        let stats = treebench::AllocStats::sample().context("failed to read jemalloc statistics")?;
        write!(out, "{}", stats.report()).context("failed to write statistics")?;
    }

    out.flush().context("failed to flush stdout")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
