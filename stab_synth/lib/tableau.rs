//! Whole-circuit Clifford action in tableau form.
//!
//! A [`Tableau`] on *n* qubits stores 2*n* Pauli rows: row *k* < *n* is the
//! image *U X*<sub>*k*</sub> *U*<sup>†</sup> (the destabilizers) and row *n* +
//! *k* is *U Z*<sub>*k*</sub> *U*<sup>†</sup> (the stabilizers of *U*∣0...0⟩).
//! Since any Pauli is a product of single-qubit *X*s and *Z*s, these rows are
//! enough to conjugate an arbitrary operator through the circuit without
//! replaying its gates.

use std::fmt;
use crate::{
    circuit::Circuit,
    gate::{ Gate, Pauli, Phase },
    gf2::BinaryMatrix,
    pauli::PauliOperator,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tableau {
    n: usize,
    rows: Vec<PauliOperator>,
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for k in 0..self.n {
            writeln!(f, "X{} -> {}", k, self.rows[k])?;
        }
        for k in 0..self.n {
            write!(f, "Z{} -> {}", k, self.rows[self.n + k])?;
            if k + 1 < self.n { writeln!(f)?; }
        }
        Ok(())
    }
}

impl Tableau {
    /// The tableau of the empty circuit on `n` qubits.
    pub fn identity(n: usize) -> Self {
        let rows
            = (0..n).map(|k| PauliOperator::single(n, k, Pauli::X))
            .chain((0..n).map(|k| PauliOperator::single(n, k, Pauli::Z)))
            .collect();
        Self { n, rows }
    }

    /// Fold every gate of `circuit` into an identity tableau on
    /// `circuit.num_qubits()` qubits.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut new = Self::identity(circuit.num_qubits());
        new.apply_circuit(circuit);
        new
    }

    pub fn num_qubits(&self) -> usize { self.n }

    /// Append a gate to the tracked circuit.
    ///
    /// *Panics if the gate acts outside the register.*
    pub fn apply_gate(&mut self, gate: Gate) {
        assert!(gate.max_qubit() < self.n, "Tableau::apply_gate: qubit out of range");
        self.rows.iter_mut().for_each(|row| { row.conjugate_in_place(gate); });
    }

    /// Append every gate of `circuit`.
    ///
    /// *Panics if the circuit acts outside the register.*
    pub fn apply_circuit(&mut self, circuit: &Circuit) {
        circuit.iter().for_each(|g| { self.apply_gate(*g); });
    }

    /// Image of *X*<sub>`k`</sub>.
    pub fn destabilizer(&self, k: usize) -> &PauliOperator { &self.rows[k] }

    /// Image of *Z*<sub>`k`</sub>.
    pub fn stabilizer(&self, k: usize) -> &PauliOperator { &self.rows[self.n + k] }

    /// The stabilizer rows, i.e. a generating set for the state the tracked
    /// circuit prepares from ∣0...0⟩.
    pub fn stabilizers(&self) -> &[PauliOperator] { &self.rows[self.n..] }

    /// Conjugate `op` through the tracked circuit, *U* `op` *U*<sup>†</sup>.
    ///
    /// Writing `op` as **i**<sup>*e*</sup> Π<sub>*k*</sub>
    /// *X*<sub>*k*</sub><sup>*x*<sub>*k*</sub></sup>
    /// *Z*<sub>*k*</sub><sup>*z*<sub>*k*</sub></sup>, where *e* counts the
    /// phase and one extra factor of **i** per *Y*, the image is the same
    /// product over the tableau rows.
    ///
    /// `op` is padded with identities up to the register size.
    ///
    /// *Panics if `op` acts on more qubits than the tableau.*
    pub fn conjugate(&self, op: &PauliOperator) -> PauliOperator {
        assert!(op.len() <= self.n, "Tableau::conjugate: operator is too long");
        let ny = op.xs().iter().zip(op.zs()).filter(|&(&x, &z)| x && z).count();
        let e = op.phase().to_int() + (ny % 4) as i8;
        let init = PauliOperator::identity(self.n).with_phase(Phase::from_int(e));
        (0..op.len())
            .fold(init, |acc, k| {
                let acc = if op.x(k) { acc.multiply(&self.rows[k]) } else { acc };
                if op.z(k) { acc.multiply(&self.rows[self.n + k]) } else { acc }
            })
    }

    /// Stack the `[xs | zs]` rows into a 2*n* × 2*n* matrix, destabilizers
    /// first.
    pub fn symplectic_matrix(&self) -> BinaryMatrix {
        BinaryMatrix::from_rows(
            2 * self.n,
            self.rows.iter().map(PauliOperator::symplectic_row),
        )
    }

    /// Phases of the 2*n* rows, in the same order as
    /// [`Self::symplectic_matrix`].
    pub fn signs(&self) -> Vec<Phase> {
        self.rows.iter().map(PauliOperator::phase).collect()
    }
}
