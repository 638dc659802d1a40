//! Command implementations behind the `stabsynth` and `random_states`
//! binaries.
//!
//! Both stabsynth verbs read their inputs from files. Failures come back as
//! [`anyhow::Error`]s; [`error_code`] recovers the stable sub-code printed on
//! stderr as `error[<code>]: <message>`.

pub mod batch;

use std::{ fs, path::Path };
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use stab_synth::{
    circuit::Circuit,
    stabilizer::parse_stabilizers,
    verify::{ verify, VerificationReport },
    synthesize_with,
    ErrorKind,
    ParseError,
    SynthConfig,
    SynthError,
};

/// Sub-code for errors that aren't a [`SynthError`] or [`ParseError`]
/// (unreadable files and the like).
pub const IO_ERROR_CODE: &str = "io";

/// Install a stderr logger whose level follows the number of `-v` flags:
/// none for warnings only, then `info`, `debug`, and `trace`.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Recover the sub-code of an error returned by one of the commands.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<SynthError>() {
        e.kind().code()
    } else if err.downcast_ref::<ParseError>().is_some() {
        ErrorKind::Parse.code()
    } else {
        IO_ERROR_CODE
    }
}

/// Read a stabilizer file and synthesize a circuit preparing its state.
///
/// If `output` is given the circuit is written there, otherwise it is only
/// returned.
pub fn synthesize_file(
    stabilizers: &Path,
    output: Option<&Path>,
    config: &SynthConfig,
) -> anyhow::Result<Circuit>
{
    let text
        = fs::read_to_string(stabilizers)
        .with_context(|| format!("failed to read {}", stabilizers.display()))?;
    let generators = parse_stabilizers(&text).map_err(SynthError::from)?;
    info!(generators = generators.len(), "read stabilizer file");
    let synthesis = synthesize_with(&generators, config)?;
    let circuit = synthesis.circuit;
    info!(
        dropped = synthesis.stabilizers.dropped().len(),
        completed = synthesis.stabilizers.len(),
        "validated and completed generators",
    );
    info!(gates = circuit.len(), counts = %circuit.gate_counts(), "synthesized");
    if let Some(path) = output {
        fs::write(path, format!("{}\n", circuit))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(circuit)
}

/// Read a circuit file and a stabilizer file and check every generator.
///
/// The generators are checked exactly as written; no validation or
/// completion is applied to them.
pub fn verify_files(circuit: &Path, stabilizers: &Path)
    -> anyhow::Result<VerificationReport>
{
    let circuit_text
        = fs::read_to_string(circuit)
        .with_context(|| format!("failed to read {}", circuit.display()))?;
    let stab_text
        = fs::read_to_string(stabilizers)
        .with_context(|| format!("failed to read {}", stabilizers.display()))?;
    let circuit = Circuit::parse(&circuit_text).map_err(SynthError::from)?;
    let generators = parse_stabilizers(&stab_text).map_err(SynthError::from)?;
    let report = verify(&circuit, &generators);
    info!(
        generators = report.len(),
        failed = report.failures().count(),
        "verified",
    );
    Ok(report)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes() {
        let err = anyhow::Error::new(SynthError::RankDeficiency { column: 3 });
        assert_eq!(error_code(&err), "rank-deficiency");
        let err = anyhow::Error::new(ParseError::Empty);
        assert_eq!(error_code(&err), "parse");
        let err = anyhow::Error::new(SynthError::from(ParseError::Empty))
            .context("reading input");
        assert_eq!(error_code(&err), "parse");
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(error_code(&err), "io");
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let stabs = dir.path().join("ghz.stab");
        let circ = dir.path().join("ghz.circ");
        // redundant third generator, missing a third independent one
        fs::write(&stabs, "XXX\nZZI\n-YYX\n").unwrap();
        let circuit = synthesize_file(&stabs, Some(&circ), &SynthConfig::default()).unwrap();
        let written = fs::read_to_string(&circ).unwrap();
        assert_eq!(written, format!("{}\n", circuit));
        assert!(verify_files(&circ, &stabs).unwrap().all_preserved());

        let err = synthesize_file(&stabs, None, &SynthConfig::default().strict())
            .unwrap_err();
        assert_eq!(error_code(&err), "dependent");
    }
}
