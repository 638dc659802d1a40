use proptest::prelude::*;
use rand::{ SeedableRng, rngs::StdRng };
use stab_synth::{
    completion,
    gf2::BinaryMatrix,
    synth,
    tableau::Tableau,
    Circuit,
    DependencyPolicy,
    Gate,
    Pauli,
    PauliOperator,
    Phase,
    StabilizerSet,
    SynthConfig,
};

fn pauli_of_len(n: usize) -> impl Strategy<Value = PauliOperator> {
    (prop::collection::vec(0_u8..4, n), any::<bool>())
        .prop_map(|(letters, neg)| {
            let ops = letters.into_iter()
                .map(|l| [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z][l as usize]);
            PauliOperator::from_paulis(ops, if neg { Phase::Pi } else { Phase::Pi0 })
        })
}

fn gate_on(n: usize) -> impl Strategy<Value = Gate> {
    prop_oneof![
        (0..n).prop_map(Gate::H),
        (0..n).prop_map(Gate::S),
        (0..n).prop_map(Gate::SInv),
        (0..n, 1..n).prop_map(move |(c, d)| Gate::CX(c, (c + d) % n)),
    ]
}

prop_compose! {
    fn pauli_pair(max_n: usize)(n in 1..=max_n)
        (a in pauli_of_len(n), b in pauli_of_len(n))
        -> (PauliOperator, PauliOperator)
    {
        (a, b)
    }
}

prop_compose! {
    fn circuit_and_op(max_n: usize)(n in 2..=max_n)
        (
            gates in prop::collection::vec(gate_on(n), 0..40),
            op in pauli_of_len(n),
            n in Just(n),
        )
        -> (Circuit, PauliOperator)
    {
        (Circuit::from_gates(n, gates), op)
    }
}

prop_compose! {
    fn matrix_and_row(max_rows: usize, max_cols: usize)
        (nrows in 0..=max_rows, ncols in 1..=max_cols)
        (
            rows in prop::collection::vec(prop::collection::vec(any::<bool>(), ncols), nrows),
            row in prop::collection::vec(any::<bool>(), ncols),
            ncols in Just(ncols),
        )
        -> (BinaryMatrix, Vec<bool>)
    {
        (BinaryMatrix::from_rows(ncols, rows), row)
    }
}

prop_compose! {
    // a full stabilizer set with arbitrary signs
    fn signed_state(max_n: usize)
        (n in 1..=max_n, seed in any::<u64>(), signs in prop::collection::vec(any::<bool>(), max_n))
        -> Vec<PauliOperator>
    {
        let mut rng = StdRng::seed_from_u64(seed);
        StabilizerSet::random(n, 2 * n, &mut rng)
            .into_generators()
            .into_iter()
            .zip(signs)
            .map(|(g, neg)| g.with_phase(if neg { -g.phase() } else { g.phase() }))
            .collect()
    }
}

proptest! {
    #[test]
    fn commutation_is_symmetric((a, b) in pauli_pair(12)) {
        prop_assert_eq!(a.commutes(&b).unwrap(), b.commutes(&a).unwrap());
    }

    #[test]
    fn rank_grows_by_at_most_one((m, row) in matrix_and_row(10, 12)) {
        let r0 = m.rank();
        let mut ext = m.clone();
        ext.push_row(&row);
        let r1 = ext.rank();
        prop_assert!(r1 == r0 || r1 == r0 + 1);
        prop_assert_eq!(m.is_independent_of(&row), r1 == r0 + 1);
    }

    #[test]
    fn nullspace_vectors_are_null((m, _row) in matrix_and_row(10, 12)) {
        let rank = m.rank();
        let ns = m.clone().nullspace();
        prop_assert_eq!(ns.len() + rank, m.num_cols());
        for v in ns.iter() {
            for i in 0..m.num_rows() {
                let dot = m.row(i).iter().zip(v).filter(|(a, b)| **a && **b).count();
                prop_assert_eq!(dot % 2, 0);
            }
        }
    }

    #[test]
    fn inverse_undoes_circuit((c, op) in circuit_and_op(6)) {
        prop_assert_eq!(c.inverse().apply(&c.apply(&op)), op.clone());
        prop_assert_eq!(c.clone().into_basis().apply(&op), c.apply(&op));
        prop_assert_eq!(c.simplify().apply(&op), c.apply(&op));
        prop_assert_eq!(Tableau::from_circuit(&c).conjugate(&op), c.apply(&op));
    }

    #[test]
    fn synthesized_circuits_verify(gens in signed_state(8)) {
        let circuit = stab_synth::synthesize(&gens).unwrap();
        prop_assert!(circuit.iter().all(|g| !g.is_sinv()));
        let report = stab_synth::verify(&circuit, &gens);
        prop_assert!(report.all_preserved(), "{}\n--\n{}", circuit, report);
    }

    #[test]
    fn completion_keeps_originals(gens in signed_state(8), k in 0_usize..8) {
        let n = gens[0].len();
        let k = 1 + k % n;
        let partial = StabilizerSet::new(gens[..k].to_vec(), DependencyPolicy::Reject).unwrap();
        let config = SynthConfig::default().with_seed(10546);
        let full = completion::complete(partial, &config).unwrap();
        prop_assert_eq!(full.len(), n);
        prop_assert_eq!(&full.generators()[..k], &gens[..k]);
        let rebuilt = StabilizerSet::new(full.generators().to_vec(), DependencyPolicy::Reject);
        prop_assert!(rebuilt.is_ok());
        let circuit = synth::synthesize_set(&full).unwrap();
        prop_assert!(stab_synth::verify(&circuit, &gens[..k]).all_preserved());
    }
}
