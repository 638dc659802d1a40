//! Synthesis and verification of Clifford circuits preparing stabilizer
//! states.
//!
//! Given Pauli stabilizer generators for a target state, the pipeline
//! 1. validates them as a [`StabilizerSet`] (equal lengths, pairwise
//!    commuting, independent up to consistent redundancy),
//! 2. [completes][completion::complete] an under-constrained set to *n*
//!    generators,
//! 3. [synthesizes][synth::synthesize_set] a circuit over {*H*, *S*, *CX*}
//!    that maps ∣0...0⟩ to the target state, and
//! 4. [verifies][verify()] the circuit by conjugating each generator back
//!    through it.
//!
//! Every stage is a pure function of its inputs; nothing is cached or shared
//! between calls, so independent problems can be run on as many threads as
//! desired.
//!
//! ```
//! use stab_synth::{ synthesize, verify, PauliOperator };
//!
//! let gens: Vec<PauliOperator>
//!     = ["XX", "ZZ"].iter().map(|s| s.parse().unwrap()).collect();
//! let circuit = synthesize(&gens).unwrap();
//! assert!(verify(&circuit, &gens).all_preserved());
//! ```

pub mod error;
pub mod gate;
pub mod pauli;
pub mod gf2;
pub mod config;
pub mod stabilizer;
pub mod completion;
pub mod circuit;
pub mod tableau;
pub mod synth;
pub mod verify;

use tracing::debug;

pub use crate::{
    circuit::Circuit,
    config::{ CancelToken, DependencyPolicy, SynthConfig },
    error::{ ErrorKind, ParseError, SynthError, SynthResult },
    gate::{ Gate, Pauli, Phase },
    pauli::PauliOperator,
    stabilizer::StabilizerSet,
    verify::{ verify, VerificationReport },
};

/// Output of [`synthesize_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synthesis {
    /// Preparation circuit over {*H*, *S*, *CX*}.
    pub circuit: Circuit,
    /// The full generator set the circuit was synthesized for: the supplied
    /// generators (minus any dropped as redundant) followed by those added
    /// during completion.
    pub stabilizers: StabilizerSet,
}

/// Run the whole pipeline with the default [`SynthConfig`].
pub fn synthesize(generators: &[PauliOperator]) -> SynthResult<Circuit> {
    synthesize_with(generators, &SynthConfig::default())
        .map(|synthesis| synthesis.circuit)
}

/// Validate, complete, and synthesize.
pub fn synthesize_with(generators: &[PauliOperator], config: &SynthConfig)
    -> SynthResult<Synthesis>
{
    let set = StabilizerSet::new(generators.to_vec(), config.dependency_policy)?;
    debug!(
        n = set.num_qubits(),
        supplied = generators.len(),
        independent = set.len(),
        "validated generator set",
    );
    let stabilizers = completion::complete(set, config)?;
    let circuit = synth::synthesize_set(&stabilizers)?;
    Ok(Synthesis { circuit, stabilizers })
}
