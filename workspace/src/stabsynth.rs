//! Synthesize and verify stabilizer-state preparation circuits.
//!
//! ```text
//! stabsynth synthesize <STABILIZERS> [CIRCUIT]
//! stabsynth verify <CIRCUIT> <STABILIZERS>
//! ```
//!
//! `synthesize` writes the circuit to `CIRCUIT`, or to stdout if it's
//! omitted. `verify` prints one line per generator to stdout and exits with 0
//! only if every generator is preserved. Any error is reported on stderr as
//! `error[<code>]: <message>` with exit code 1, where `<code>` is one of
//! `parse`, `anticommuting`, `dependent`, `inconsistent-signs`, `incomplete`,
//! `rank-deficiency`, `cancelled`, or `io`.

use std::{ path::PathBuf, process::ExitCode };
use clap::{ Parser, Subcommand };
use stab_synth::{ config::DEFAULT_MAX_RANDOM_TRIALS, SynthConfig };
use stabsynth_cli::{ error_code, init_logging, synthesize_file, verify_files };

#[derive(Parser)]
#[command(name = "stabsynth")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a circuit preparing the state of a stabilizer file
    Synthesize {
        /// Stabilizer file, one Pauli string per line
        stabilizers: PathBuf,

        /// Output circuit file (default: stdout)
        circuit: Option<PathBuf>,

        /// Seed for the randomized completion search
        #[arg(long)]
        seed: Option<u64>,

        /// Bound on randomized completion trials
        #[arg(long, default_value_t = DEFAULT_MAX_RANDOM_TRIALS)]
        max_trials: usize,

        /// Reject redundant generators instead of dropping them
        #[arg(long)]
        strict: bool,
    },

    /// Check that a circuit prepares a state with the given stabilizers
    Verify {
        /// Circuit file
        circuit: PathBuf,

        /// Stabilizer file, one Pauli string per line
        stabilizers: PathBuf,
    },
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Synthesize { stabilizers, circuit, seed, max_trials, strict } => {
            let mut config = SynthConfig::default().with_max_random_trials(max_trials);
            if let Some(s) = seed { config = config.with_seed(s); }
            if strict { config = config.strict(); }
            let synthesized = synthesize_file(&stabilizers, circuit.as_deref(), &config)?;
            if circuit.is_none() && !synthesized.is_empty() {
                println!("{}", synthesized);
            }
            Ok(ExitCode::SUCCESS)
        },
        Commands::Verify { circuit, stabilizers } => {
            let report = verify_files(&circuit, &stabilizers)?;
            println!("{}", report);
            if report.all_preserved() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error[{}]: {:#}", error_code(&err), err);
            ExitCode::FAILURE
        },
    }
}
