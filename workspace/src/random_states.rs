//! Synthesize and verify batches of random stabilizer states, one batch per
//! qubit count, and print pass rates and mean circuit costs.

use clap::Parser;
use tracing::info;
use stabsynth_cli::{ batch::run_batch, init_logging };

#[derive(Parser)]
#[command(name = "random_states")]
#[command(about = "Round-trip random stabilizer states through synthesis")]
struct Args {
    /// Largest number of qubits
    #[arg(short = 'n', long, default_value_t = 12)]
    max_qubits: usize,

    /// Samples per qubit count
    #[arg(short, long, default_value_t = 500)]
    samples: usize,

    #[arg(long, default_value_t = 10546)]
    seed: u64,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("{:>6} {:>8} {:>10} {:>10} {:>10} {:>10}",
        "qubits", "samples", "pass", "gates", "cx", "depth");
    for n in 1..=args.max_qubits {
        let stats = run_batch(n, args.samples, args.seed);
        info!(n, errors = stats.errors, "batch finished");
        println!("{:>6} {:>8} {:>10.4} {:>10.2} {:>10.2} {:>10.2}",
            stats.qubits,
            stats.samples,
            stats.pass_rate(),
            stats.mean_gates,
            stats.mean_cx,
            stats.mean_depth,
        );
    }
}
