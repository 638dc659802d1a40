//! Batch runs of synthesize + verify over random stabilizer states.

use rand::{ rngs::StdRng, Rng, SeedableRng };
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use stab_synth::{
    stabilizer::StabilizerSet,
    synthesize,
    verify,
    PauliOperator,
};

/// Aggregate results for one qubit count.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BatchStats {
    pub qubits: usize,
    pub samples: usize,
    /// Samples whose circuit preserved every generator.
    pub passed: usize,
    /// Samples for which synthesis itself returned an error.
    pub errors: usize,
    pub mean_gates: f64,
    pub mean_cx: f64,
    pub mean_depth: f64,
}

impl BatchStats {
    pub fn pass_rate(&self) -> f64 {
        if self.samples == 0 { 1.0 } else { self.passed as f64 / self.samples as f64 }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Sample {
    passed: bool,
    error: bool,
    gates: usize,
    cx: usize,
    depth: usize,
}

fn run_sample(n: usize, seed: u64) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let generators: Vec<PauliOperator>
        = StabilizerSet::random(n, 2 * n, &mut rng)
        .into_generators()
        .into_iter()
        .map(|g| if rng.gen::<bool>() { g.with_phase(-g.phase()) } else { g })
        .collect();
    match synthesize(&generators) {
        Ok(circuit) => Sample {
            passed: verify(&circuit, &generators).all_preserved(),
            error: false,
            gates: circuit.len(),
            cx: circuit.two_qubit_count(),
            depth: circuit.depth(),
        },
        Err(_) => Sample { error: true, ..Sample::default() },
    }
}

/// Draw `samples` random `n`-qubit states with random signs, each from its own
/// seed derived from `seed`, and synthesize + verify them in parallel.
pub fn run_batch(n: usize, samples: usize, seed: u64) -> BatchStats {
    let results: Vec<Sample>
        = (0..samples).into_par_iter()
        .map(|k| run_sample(n, seed.wrapping_add((n as u64) << 32).wrapping_add(k as u64)))
        .collect();
    let ok: Vec<&Sample> = results.iter().filter(|s| !s.error).collect();
    let mean = |f: fn(&Sample) -> usize| -> f64 {
        if ok.is_empty() {
            0.0
        } else {
            ok.iter().map(|s| f(*s) as f64).sum::<f64>() / ok.len() as f64
        }
    };
    BatchStats {
        qubits: n,
        samples,
        passed: results.iter().filter(|s| s.passed).count(),
        errors: results.len() - ok.len(),
        mean_gates: mean(|s| s.gates),
        mean_cx: mean(|s| s.cx),
        mean_depth: mean(|s| s.depth),
    }
}
