//! Pipeline timing simulator CLI.
//!
//! This binary is the single entry point for trace-driven runs. It performs:
//! 1. **Argument parsing:** `sim <ROB_SIZE> <IQ_SIZE> <WIDTH> <TRACE_PATH>`.
//! 2. **Simulation:** Streams the trace through the pipeline model.
//! 3. **Reporting:** One timing line per retired instruction on stdout,
//!    followed by the configuration and IPC summary.
//!
//! Diagnostics go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) for
//! stage-level tracing.

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dynsched_core::sim::report;
use dynsched_core::{SimConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    version,
    about = "Cycle-accurate superscalar out-of-order pipeline timing simulator",
    long_about = "Simulates a dynamically scheduled pipeline over an instruction trace \
                  and reports, per retired instruction, the cycle each stage was entered \
                  and how long it was held there.\n\nExample:\n  sim 64 16 2 traces/gcc_trace.txt"
)]
struct Cli {
    /// Reorder buffer capacity in entries.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    rob_size: u64,

    /// Issue queue capacity in entries.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    iq_size: u64,

    /// Superscalar width (instructions per cycle).
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    width: u64,

    /// Instruction trace to simulate.
    trace: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SimConfig::new(
        cli.rob_size as usize,
        cli.iq_size as usize,
        cli.width as usize,
    );

    let mut sim = match Simulator::from_trace_file(&config, &cli.trace) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let stdout = std::io::stdout().lock();
    let mut out = BufWriter::new(stdout);

    let result = (|| {
        sim.run(&mut out)?;
        report::write_summary(
            &mut out,
            &config,
            &cli.trace.display().to_string(),
            sim.stats(),
        )?;
        out.flush()
    })();

    if let Err(e) = result {
        eprintln!("Error: failed to write report: {e}");
        process::exit(1);
    }
}
