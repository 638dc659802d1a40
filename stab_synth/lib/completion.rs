//! Extension of an under-constrained generator set to a full one.
//!
//! The search runs in two tiers:
//! 1. every single-qubit *Z*, then every single-qubit *X*, in qubit order;
//! 2. uniformly random *X*/*Z* bit patterns, up to
//!    [`SynthConfig::max_random_trials`] draws.
//!
//! A candidate is accepted if it commutes with every generator collected so
//! far and is independent of them. Accepted candidates carry sign +1.

use rand::{ rngs::StdRng, Rng, SeedableRng };
use rustc_hash::FxHashSet;
use tracing::{ debug, trace };
use crate::{
    config::SynthConfig,
    error::{ SynthError, SynthResult },
    gate::{ Pauli, Phase },
    gf2::BinaryMatrix,
    pauli::PauliOperator,
    stabilizer::StabilizerSet,
};

struct Completer {
    set: StabilizerSet,
    matrix: BinaryMatrix,
}

impl Completer {
    fn new(set: StabilizerSet) -> Self {
        let matrix = set.symplectic_matrix();
        Self { set, matrix }
    }

    fn done(&self) -> bool { self.set.is_complete() }

    // add `candidate` if it's compatible; return whether it was added
    fn try_add(&mut self, candidate: PauliOperator) -> bool {
        if candidate.is_identity() || !self.set.commutes_with(&candidate) {
            return false;
        }
        let row = candidate.symplectic_row();
        if !self.matrix.is_independent_of(&row) { return false; }
        trace!(candidate = %candidate, "accepted completion candidate");
        self.matrix.push_row(&row);
        self.set.push_unchecked(candidate);
        true
    }
}

/// Extend `set` to `n` generators. The original generators are kept, in
/// order, at the front of the returned set.
///
/// Returns `IncompleteGeneratorSet` if the random tier runs out of trials,
/// and `Cancelled` if the config's cancel token is tripped during it.
pub fn complete(set: StabilizerSet, config: &SynthConfig)
    -> SynthResult<StabilizerSet>
{
    let n = set.num_qubits();
    let k0 = set.len();
    if set.is_complete() { return Ok(set); }
    let mut completer = Completer::new(set);

    let singles
        = (0..n).map(|k| PauliOperator::single(n, k, Pauli::Z))
        .chain((0..n).map(|k| PauliOperator::single(n, k, Pauli::X)));
    for candidate in singles {
        if completer.done() { break; }
        completer.try_add(candidate);
    }
    debug!(
        found = completer.set.len() - k0,
        needed = n - k0,
        "single-qubit completion tier finished",
    );
    if completer.done() { return Ok(completer.set); }

    let mut rng
        = config.seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy);
    let mut seen: FxHashSet<Vec<bool>> = FxHashSet::default();
    let mut trials: usize = 0;
    while trials < config.max_random_trials {
        if config.is_cancelled() {
            debug!(trials, "completion search cancelled");
            return Err(SynthError::Cancelled);
        }
        trials += 1;
        let row: Vec<bool> = (0..2 * n).map(|_| rng.gen::<bool>()).collect();
        if !seen.insert(row.clone()) { continue; }
        completer.try_add(PauliOperator::from_symplectic_row(&row, Phase::Pi0));
        if completer.done() {
            debug!(trials, "random completion tier finished");
            return Ok(completer.set);
        }
    }
    debug!(trials, found = completer.set.len(), "completion search exhausted");
    Err(SynthError::IncompleteGeneratorSet { found: completer.set.len(), needed: n })
}
