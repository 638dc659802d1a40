//! Post-hoc checking of a circuit against a list of generators.
//!
//! For circuit unitary *U*, a generator *g* is preserved by *U*∣0...0⟩ iff
//! *U*<sup>†</sup> *g U* stabilizes ∣0...0⟩, i.e. is a product of *Z*s and
//! identities with sign +1. Verification never fails: a generator that isn't
//! preserved is an ordinary report entry carrying that residual operator.

use std::fmt;
use tracing::debug;
use crate::{
    circuit::Circuit,
    gate::Phase,
    pauli::PauliOperator,
    tableau::Tableau,
};

/// Outcome for a single generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorCheck {
    /// Position in the list passed to [`verify`].
    pub index: usize,
    pub generator: PauliOperator,
    pub preserved: bool,
    /// *U*<sup>†</sup> *g U*, kept only when `preserved` is `false`.
    pub residual: Option<PauliOperator>,
}

/// Per-generator results of [`verify`], in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationReport {
    checks: Vec<GeneratorCheck>,
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, check) in self.checks.iter().enumerate() {
            if k > 0 { writeln!(f)?; }
            match &check.residual {
                None => write!(f, "{} {} preserved", check.index, check.generator)?,
                Some(r) => write!(
                    f, "{} {} NOT preserved (residual {})",
                    check.index, check.generator, r,
                )?,
            }
        }
        Ok(())
    }
}

impl VerificationReport {
    pub fn checks(&self) -> &[GeneratorCheck] { &self.checks }

    pub fn len(&self) -> usize { self.checks.len() }

    pub fn is_empty(&self) -> bool { self.checks.is_empty() }

    /// Return `true` if every generator was preserved.
    pub fn all_preserved(&self) -> bool { self.checks.iter().all(|c| c.preserved) }

    /// Checks for generators that were not preserved.
    pub fn failures(&self) -> impl Iterator<Item = &GeneratorCheck> + '_ {
        self.checks.iter().filter(|c| !c.preserved)
    }

    /// Return `Some(preserved)` for the generator at `index`.
    pub fn is_preserved(&self, index: usize) -> Option<bool> {
        self.checks.get(index).map(|c| c.preserved)
    }
}

/// Check which of `generators` are stabilizers of `circuit` applied to
/// ∣0...0⟩.
///
/// Generators narrower than the circuit are padded with identities (the extra
/// qubits start in ∣0⟩); if a generator is wider, the circuit is taken to act
/// trivially on the remaining qubits.
pub fn verify(circuit: &Circuit, generators: &[PauliOperator]) -> VerificationReport {
    let n
        = generators.iter()
        .map(PauliOperator::len)
        .fold(circuit.num_qubits(), usize::max);
    let mut tab = Tableau::identity(n);
    tab.apply_circuit(&circuit.inverse());
    let checks: Vec<GeneratorCheck>
        = generators.iter().enumerate()
        .map(|(index, g)| {
            let r = tab.conjugate(g);
            let preserved = r.is_z_type() && r.phase() == Phase::Pi0;
            GeneratorCheck {
                index,
                generator: g.clone(),
                preserved,
                residual: (!preserved).then_some(r),
            }
        })
        .collect();
    let report = VerificationReport { checks };
    debug!(
        generators = report.len(),
        failed = report.failures().count(),
        "verified circuit",
    );
    report
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gate::Gate;

    fn ops(strs: &[&str]) -> Vec<PauliOperator> {
        strs.iter().map(|s| PauliOperator::parse(s).unwrap()).collect()
    }

    #[test]
    fn bell_state() {
        let c = Circuit::from_gates(2, [Gate::H(0), Gate::CX(0, 1)]);
        let report = verify(&c, &ops(&["XX", "ZZ", "-YY"]));
        assert!(report.all_preserved());
        assert_eq!(report.len(), 3);

        let report = verify(&c, &ops(&["-XX", "ZI", "YY"]));
        assert!(!report.all_preserved());
        let failed: Vec<usize> = report.failures().map(|c| c.index).collect();
        assert_eq!(failed, vec![0, 1, 2]);
        assert_eq!(report.checks()[0].residual, Some(PauliOperator::parse("-ZI").unwrap()));
        assert_eq!(report.checks()[1].residual, Some(PauliOperator::parse("XI").unwrap()));
    }

    #[test]
    fn empty_circuit() {
        let report = verify(&Circuit::new(0), &ops(&["Z", "-Z", "X"]));
        assert_eq!(report.is_preserved(0), Some(true));
        assert_eq!(report.is_preserved(1), Some(false));
        assert_eq!(report.is_preserved(2), Some(false));
        assert_eq!(report.is_preserved(3), None);
        assert_eq!(
            report.to_string(),
            "0 +Z preserved\n1 -Z NOT preserved (residual -Z)\n2 +X NOT preserved (residual +X)",
        );
    }

    #[test]
    fn padding() {
        // the circuit touches qubit 2, the generators only name qubits 0 and 1
        let c = Circuit::from_gates(3, [Gate::H(2)]);
        let report = verify(&c, &ops(&["ZZ", "IZ"]));
        assert!(report.all_preserved());
        let report = verify(&c, &ops(&["IIX", "IIZ"]));
        assert_eq!(report.is_preserved(0), Some(true));
        assert_eq!(report.is_preserved(1), Some(false));
    }
}
