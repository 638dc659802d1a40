//! Clifford circuit synthesis from a full stabilizer set.
//!
//! The synthesizer runs symplectic Gaussian elimination on the live generator
//! rows, emitting a gate sequence *V* that maps the target stabilizer group
//! onto ⟨*Z*<sub>0</sub>, ..., *Z*<sub>*n*-1</sub>⟩. Every emitted gate is
//! conjugated through every row; row multiplications are bookkeeping only and
//! emit nothing. The stages are:
//! 1. Column sweep. For each column, pick the lowest row at or below the
//!    diagonal with an X-bit there, emitting *H* on the column first if only
//!    Z-bits are available. Swap it onto the diagonal and multiply it into
//!    every other row with an X-bit in that column, then clear the rest of
//!    its own X-support with `CX(column, q)`. Afterwards the X-block is the
//!    identity and, since the rows commute, the Z-block is symmetric.
//! 2. *S* on every qubit whose row has a diagonal Z-bit.
//! 3. *CZ* = *H*<sub>*k*</sub> *CX*(*j*, *k*) *H*<sub>*k*</sub> for every
//!    remaining off-diagonal Z-bit (*j* < *k*).
//! 4. A Pauli *Z* (as *S*<sup>†</sup>*S*<sup>†</sup>) on every row carrying
//!    sign -1.
//! 5. *H* on every qubit.
//!
//! The circuit that prepares the state from ∣0...0⟩ is then *V*<sup>†</sup>,
//! written over {*H*, *S*, *CX*}.

use tracing::{ debug, trace };
use crate::{
    circuit::Circuit,
    error::{ SynthError, SynthResult },
    gate::{ Gate, Phase },
    gf2::pivot_row,
    pauli::PauliOperator,
    stabilizer::StabilizerSet,
};

struct Reducer {
    n: usize,
    rows: Vec<PauliOperator>,
    emitted: Circuit,
}

impl Reducer {
    fn new(set: &StabilizerSet) -> Self {
        let n = set.num_qubits();
        Self { n, rows: set.generators().to_vec(), emitted: Circuit::new(n) }
    }

    fn emit(&mut self, gate: Gate) {
        self.rows.iter_mut().for_each(|row| { row.conjugate_in_place(gate); });
        self.emitted.push(gate);
    }

    fn sweep_column(&mut self, col: usize) -> SynthResult<()> {
        let pivot
            = match pivot_row(self.rows.iter().map(|r| r.x(col)), col) {
                Some(p) => p,
                None => {
                    let p
                        = pivot_row(self.rows.iter().map(|r| r.z(col)), col)
                        .ok_or(SynthError::RankDeficiency { column: col })?;
                    self.emit(Gate::H(col));
                    p
                },
            };
        trace!(column = col, pivot, "column pivot");
        self.rows.swap(col, pivot);
        for k in 0..self.rows.len() {
            if k != col && self.rows[k].x(col) {
                self.rows[k] = self.rows[k].multiply(&self.rows[col]);
            }
        }
        let targets: Vec<usize>
            = (col + 1..self.n).filter(|&q| self.rows[col].x(q)).collect();
        targets.into_iter().for_each(|q| { self.emit(Gate::CX(col, q)); });
        Ok(())
    }

    fn clear_z_block(&mut self) {
        for j in 0..self.n {
            if self.rows[j].z(j) { self.emit(Gate::S(j)); }
        }
        for j in 0..self.n {
            for k in j + 1..self.n {
                if self.rows[j].z(k) {
                    self.emit(Gate::H(k));
                    self.emit(Gate::CX(j, k));
                    self.emit(Gate::H(k));
                }
            }
        }
    }

    fn fix_signs(&mut self) {
        for j in 0..self.n {
            if self.rows[j].phase() == Phase::Pi {
                self.emit(Gate::SInv(j));
                self.emit(Gate::SInv(j));
            }
        }
    }
}

/// Synthesize a preparation circuit for a complete stabilizer set.
///
/// Applied to ∣0...0⟩, the returned circuit (over *H*, *S*, *CX* only) gives
/// a state stabilized by every generator in `set` with eigenvalue +1. The
/// output depends only on the order of the generators, never on any random
/// state.
///
/// Returns `RankDeficiency` if the set has fewer than `n` generators, at the
/// first column no remaining generator covers.
pub fn synthesize_set(set: &StabilizerSet) -> SynthResult<Circuit> {
    let n = set.num_qubits();
    let mut reducer = Reducer::new(set);
    for col in 0..n {
        reducer.sweep_column(col)?;
    }
    reducer.clear_z_block();
    reducer.fix_signs();
    (0..n).for_each(|j| { reducer.emit(Gate::H(j)); });
    trace!(
        rows = %reducer.rows.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(","),
        "reduced rows",
    );

    let reduction = reducer.emitted.simplify();
    let circuit = reduction.inverse().into_basis();
    debug!(
        n,
        gates = circuit.len(),
        cx = circuit.two_qubit_count(),
        depth = circuit.depth(),
        "synthesized circuit",
    );
    Ok(circuit)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        config::DependencyPolicy,
        tableau::Tableau,
    };

    fn set(strs: &[&str]) -> StabilizerSet {
        let ops = strs.iter().map(|s| PauliOperator::parse(s).unwrap()).collect();
        StabilizerSet::new(ops, DependencyPolicy::Reject).unwrap()
    }

    // every generator conjugated back to |0...0> must be a +1 Z-type operator
    fn prepares(circuit: &Circuit, set: &StabilizerSet) -> bool {
        let n = set.num_qubits().max(circuit.num_qubits());
        let mut t = Tableau::identity(n);
        t.apply_circuit(&circuit.inverse());
        set.iter().all(|g| {
            let r = t.conjugate(g);
            r.is_z_type() && r.phase() == Phase::Pi0
        })
    }

    #[test]
    fn single_qubit_states() {
        let c = synthesize_set(&set(&["X"])).unwrap();
        assert_eq!(c.gates(), &[Gate::H(0)]);

        let c = synthesize_set(&set(&["Z"])).unwrap();
        assert!(c.is_empty());

        for s in ["-Z", "Y", "-Y", "-X"] {
            let st = set(&[s]);
            let c = synthesize_set(&st).unwrap();
            assert!(prepares(&c, &st), "{s}: {c}");
        }
    }

    #[test]
    fn computational_basis_needs_no_gates() {
        let c = synthesize_set(&set(&["ZZ", "ZI"])).unwrap();
        assert!(c.is_empty());
        let c = synthesize_set(&set(&["ZII", "IZI", "IIZ"])).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn five_qubit_code() {
        let st = set(&["XZZXI", "IXZZX", "XIXZZ", "ZXIXZ", "ZZZZZ"]);
        let c = synthesize_set(&st).unwrap();
        assert!(prepares(&c, &st));
        assert_eq!(c.num_qubits(), 5);
        assert!(c.iter().all(|g| !g.is_sinv()));
    }

    #[test]
    fn negative_signs() {
        for strs in [
            &["-XX", "-ZZ"][..],
            &["XX", "-ZZ"],
            &["-YY", "XX"],
            &["-XZZXI", "IXZZX", "-XIXZZ", "ZXIXZ", "-ZZZZZ"],
        ] {
            let st = set(strs);
            let c = synthesize_set(&st).unwrap();
            assert!(prepares(&c, &st), "{strs:?}: {c}");
        }
    }

    #[test]
    fn deterministic() {
        let st = set(&["XZZXI", "IXZZX", "XIXZZ", "ZXIXZ", "ZZZZZ"]);
        assert_eq!(synthesize_set(&st).unwrap(), synthesize_set(&st).unwrap());
    }

    #[test]
    fn rank_deficiency() {
        assert_eq!(
            synthesize_set(&set(&["ZZI", "XXI"])),
            Err(SynthError::RankDeficiency { column: 2 }),
        );
        assert_eq!(
            synthesize_set(&set(&["IZ"])),
            Err(SynthError::RankDeficiency { column: 0 }),
        );
    }
}
