//! Validated sets of stabilizer generators.
//!
//! A [`StabilizerSet`] can only be built through [`StabilizerSet::new`] (or
//! the parsing/sampling constructors that go through equivalent checks), so
//! holding one means its generators are all the same length, pairwise
//! commuting, and linearly independent.

use std::fmt;
use rand::Rng;
use tracing::{ debug, trace };
use crate::{
    circuit::Circuit,
    config::DependencyPolicy,
    error::{ ParseError, SynthError, SynthResult },
    gate::Pauli,
    gf2::BinaryMatrix,
    pauli::PauliOperator,
};

/// Parse a stabilizer file: one Pauli string per line.
///
/// Blank lines are skipped and `#` starts a comment running to the end of the
/// line. Every string must have the same length. Errors are tagged with their
/// 1-based line number.
pub fn parse_stabilizers(text: &str) -> Result<Vec<PauliOperator>, ParseError> {
    let mut ops: Vec<PauliOperator> = Vec::new();
    for (k, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() { continue; }
        let op = PauliOperator::parse(content).map_err(|e| e.at_line(k + 1))?;
        if let Some(first) = ops.first() {
            if first.len() != op.len() {
                let err = ParseError::LengthMismatch {
                    expected: first.len(),
                    found: op.len(),
                };
                return Err(err.at_line(k + 1));
            }
        }
        ops.push(op);
    }
    if ops.is_empty() { return Err(ParseError::NoGenerators); }
    Ok(ops)
}

/// An ordered list of independent, pairwise-commuting Pauli operators on `n`
/// qubits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StabilizerSet {
    n: usize,
    generators: Vec<PauliOperator>,
    dropped: Vec<usize>,
}

impl fmt::Display for StabilizerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, g) in self.generators.iter().enumerate() {
            fmt::Display::fmt(g, f)?;
            if k + 1 < self.generators.len() { writeln!(f)?; }
        }
        Ok(())
    }
}

impl AsRef<[PauliOperator]> for StabilizerSet {
    fn as_ref(&self) -> &[PauliOperator] { &self.generators }
}

impl<'a> IntoIterator for &'a StabilizerSet {
    type Item = &'a PauliOperator;
    type IntoIter = std::slice::Iter<'a, PauliOperator>;

    fn into_iter(self) -> Self::IntoIter { self.generators.iter() }
}

// unique combination of `basis` rows equal to `target`, assuming `basis` is
// independent and `target` lies in its span
fn combination_of(basis: &[PauliOperator], target: &PauliOperator)
    -> Option<Vec<usize>>
{
    let rows: Vec<Vec<bool>>
        = basis.iter().chain(std::iter::once(target))
        .map(PauliOperator::symplectic_row)
        .collect();
    let m = BinaryMatrix::from_rows(2 * target.len(), rows).transpose();
    m.nullspace().into_iter()
        .find(|v| v[basis.len()])
        .map(|v| {
            v[..basis.len()].iter().enumerate()
                .filter_map(|(k, b)| b.then_some(k))
                .collect()
        })
}

impl StabilizerSet {
    /// Validate a list of generators.
    ///
    /// Checks, in order:
    /// 1. at least one generator, all of the same length (`ParseError`);
    /// 2. every pair commutes (`AnticommutingGenerators`, naming the first
    ///    offending pair);
    /// 3. every generator is independent of the ones before it. A generator
    ///    that is a product of earlier ones is either dropped or rejected
    ///    according to `policy`; under [`DependencyPolicy::Reduce`] it must
    ///    still carry the same sign as that product, otherwise the set would
    ///    stabilize -*I* and construction fails with `InconsistentSigns`. This
    ///    covers `-I` itself as well as sets like `XX, ZZ, YY`, where
    ///    *XX*·*ZZ* = -*YY*.
    pub fn new(ops: Vec<PauliOperator>, policy: DependencyPolicy)
        -> SynthResult<Self>
    {
        let n = ops.first().map(PauliOperator::len).ok_or(ParseError::NoGenerators)?;
        if let Some(bad) = ops.iter().find(|op| op.len() != n) {
            return Err(
                ParseError::LengthMismatch { expected: n, found: bad.len() }.into()
            );
        }
        for (i, a) in ops.iter().enumerate() {
            for (j, b) in ops.iter().enumerate().skip(i + 1) {
                if !a.commutes(b)? {
                    return Err(SynthError::AnticommutingGenerators {
                        first: i,
                        second: j,
                    });
                }
            }
        }

        let mut generators: Vec<PauliOperator> = Vec::with_capacity(ops.len());
        let mut dropped: Vec<usize> = Vec::new();
        let mut matrix = BinaryMatrix::new(2 * n);
        for (index, op) in ops.into_iter().enumerate() {
            let row = op.symplectic_row();
            if matrix.is_independent_of(&row) {
                matrix.push_row(&row);
                generators.push(op);
                continue;
            }
            if policy == DependencyPolicy::Reject {
                return Err(SynthError::DependentGenerators { index });
            }
            let combo
                = combination_of(&generators, &op)
                .ok_or(SynthError::DependentGenerators { index })?;
            let product
                = combo.iter()
                .fold(PauliOperator::identity(n), |acc, &k| {
                    acc.multiply(&generators[k])
                });
            if product.phase() != op.phase() {
                return Err(SynthError::InconsistentSigns { index });
            }
            trace!(index, generator = %op, "dropping redundant generator");
            dropped.push(index);
        }
        if !dropped.is_empty() {
            debug!(
                kept = generators.len(),
                dropped = dropped.len(),
                "reduced generator set",
            );
        }
        Ok(Self { n, generators, dropped })
    }

    /// Parse and validate a stabilizer file; see [`parse_stabilizers`].
    pub fn parse(text: &str, policy: DependencyPolicy) -> SynthResult<Self> {
        Self::new(parse_stabilizers(text)?, policy)
    }

    /// Sample a random full stabilizer set: the images of *Z*<sub>0</sub>, ...,
    /// *Z*<sub>*n*-1</sub> under a random brickwork circuit of the given
    /// depth (see [`Circuit::random_brickwork`]).
    pub fn random<R>(n: usize, depth: usize, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        let circuit = Circuit::random_brickwork(n, depth, rng);
        let generators: Vec<PauliOperator>
            = (0..n)
            .map(|k| circuit.apply(&PauliOperator::single(n, k, Pauli::Z)))
            .collect();
        // images of an independent commuting set under a Clifford are again
        // independent and commuting
        Self { n, generators, dropped: Vec::new() }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Number of (independent) generators.
    pub fn len(&self) -> usize { self.generators.len() }

    pub fn is_empty(&self) -> bool { self.generators.is_empty() }

    /// Return `true` if the set determines a unique state, i.e. has `n`
    /// generators.
    pub fn is_complete(&self) -> bool { self.generators.len() == self.n }

    pub fn generators(&self) -> &[PauliOperator] { &self.generators }

    /// Indices (into the list given to [`Self::new`]) of generators that were
    /// dropped as redundant.
    pub fn dropped(&self) -> &[usize] { &self.dropped }

    pub fn iter(&self) -> std::slice::Iter<'_, PauliOperator> {
        self.generators.iter()
    }

    pub fn into_generators(self) -> Vec<PauliOperator> { self.generators }

    /// Stack the generators' `[xs | zs]` rows into a `len × 2n` matrix.
    pub fn symplectic_matrix(&self) -> BinaryMatrix {
        BinaryMatrix::from_rows(
            2 * self.n,
            self.generators.iter().map(PauliOperator::symplectic_row),
        )
    }

    /// Return `true` if `op` commutes with every generator.
    ///
    /// *Panics if `op` acts on a different number of qubits.*
    pub fn commutes_with(&self, op: &PauliOperator) -> bool {
        assert_eq!(op.len(), self.n, "StabilizerSet::commutes_with: wrong length");
        self.generators.iter()
            .all(|g| g.commutes(op).is_ok_and(|c| c))
    }

    // caller is responsible for commutation and independence
    pub(crate) fn push_unchecked(&mut self, op: PauliOperator) {
        self.generators.push(op);
    }
}
