//! Ordered gate sequences and their action on Pauli operators.
//!
//! Circuits are read and written in a line-oriented text format:
//! ```text
//! # comment
//! H 0 1 2
//! CX 0 1 2 3
//! S 4
//! ```
//! `H`, `S`, and `S_DAG` take any number of single-qubit targets; `CX` (alias
//! `CNOT`) takes targets in control/target pairs. Gate names are
//! case-insensitive. Targets must be below [`MAX_QUBITS`].

use std::{ fmt, str::FromStr };
use itertools::Itertools;
use rand::Rng;
use crate::{
    error::ParseError,
    gate::Gate,
    pauli::PauliOperator,
};

/// Exclusive upper bound on qubit targets accepted by [`Circuit::parse`].
pub const MAX_QUBITS: usize = 1 << 16;

/// An ordered, append-only sequence of [`Gate`]s on a register of qubits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Circuit {
    n: usize,
    gates: Vec<Gate>,
}

impl fmt::Display for Circuit {
    /// Consecutive gates of the same kind share a line. *S*<sup>†</sup> is
    /// written as three `S` targets on its qubit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.gates.iter().chunk_by(|g| line_name(g));
        for (k, (name, chunk)) in (&lines).into_iter().enumerate() {
            if k > 0 { writeln!(f)?; }
            let targets
                = chunk.flat_map(|g| {
                    match *g {
                        Gate::SInv(q) => vec![q, q, q],
                        Gate::H(q) | Gate::S(q) => vec![q],
                        Gate::CX(a, b) => vec![a, b],
                    }
                })
                .join(" ");
            write!(f, "{} {}", name, targets)?;
        }
        Ok(())
    }
}

fn overlaps(a: &Gate, b: &Gate) -> bool {
    match b.qubits() {
        (p, None) => a.acts_on(p),
        (p, Some(q)) => a.acts_on(p) || a.acts_on(q),
    }
}

fn line_name(gate: &Gate) -> &'static str {
    match gate {
        Gate::SInv(..) => "S",
        g => g.name(),
    }
}

impl FromStr for Circuit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter { self.gates.iter() }
}

impl IntoIterator for Circuit {
    type Item = Gate;
    type IntoIter = std::vec::IntoIter<Gate>;

    fn into_iter(self) -> Self::IntoIter { self.gates.into_iter() }
}

/// Number of gates of each kind in a [`Circuit`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GateCounts {
    pub h: usize,
    pub s: usize,
    pub s_dag: usize,
    pub cx: usize,
}

impl GateCounts {
    pub fn total(&self) -> usize { self.h + self.s + self.s_dag + self.cx }
}

impl fmt::Display for GateCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H: {}, S: {}, S_DAG: {}, CX: {}", self.h, self.s, self.s_dag, self.cx)
    }
}

impl Circuit {
    /// Create an empty circuit on `n` qubits.
    pub fn new(n: usize) -> Self { Self { n, gates: Vec::new() } }

    /// Create a circuit from a gate sequence. The register is widened past `n`
    /// if any gate acts on a higher qubit.
    ///
    /// *Panics if a `CX` has equal control and target.*
    pub fn from_gates<I>(n: usize, gates: I) -> Self
    where I: IntoIterator<Item = Gate>
    {
        let mut new = Self::new(n);
        gates.into_iter().for_each(|g| { new.push(g); });
        new
    }

    /// Append a gate, widening the register if needed.
    ///
    /// *Panics if a `CX` has equal control and target.*
    pub fn push(&mut self, gate: Gate) {
        if let Gate::CX(a, b) = gate {
            assert_ne!(a, b, "Circuit::push: CX control and target must differ");
        }
        self.n = self.n.max(gate.max_qubit().saturating_add(1));
        self.gates.push(gate);
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Number of gates.
    pub fn len(&self) -> usize { self.gates.len() }

    pub fn is_empty(&self) -> bool { self.gates.is_empty() }

    pub fn gates(&self) -> &[Gate] { &self.gates }

    pub fn iter(&self) -> std::slice::Iter<'_, Gate> { self.gates.iter() }

    /// Conjugate `op` through every gate in order, giving *U* `op`
    /// *U*<sup>†</sup> for the circuit unitary *U*.
    ///
    /// `op` is padded with identities if the circuit acts on more qubits.
    pub fn apply(&self, op: &PauliOperator) -> PauliOperator {
        let mut out = op.padded(self.n);
        self.gates.iter().for_each(|g| { out.conjugate_in_place(*g); });
        out
    }

    /// The reversed sequence of inverted gates.
    pub fn inverse(&self) -> Self {
        Self {
            n: self.n,
            gates: self.gates.iter().rev().map(|g| g.inverse()).collect(),
        }
    }

    /// Rewrite every *S*<sup>†</sup> as three *S* gates, so that only *H*,
    /// *S*, and *CX* remain.
    pub fn into_basis(self) -> Self {
        let gates
            = self.gates.into_iter()
            .flat_map(|g| {
                match g {
                    Gate::SInv(k) => vec![Gate::S(k); 3],
                    g => vec![g],
                }
            })
            .collect();
        Self { n: self.n, gates }
    }

    /// Cancel pairs of mutually inverse gates (*H H*, *CX CX* on the same
    /// qubits, *S S*<sup>†</sup>) that are separated only by gates on other
    /// qubits. Cancellation cascades, so e.g. `H 0; S 0; H 1; S_DAG 0; H 0`
    /// reduces to `H 1`.
    pub fn simplify(&self) -> Self {
        let mut gates: Vec<Gate> = Vec::with_capacity(self.gates.len());
        for &g in self.gates.iter() {
            let inv = g.inverse();
            let hit
                = gates.iter().rposition(|h| overlaps(h, &g))
                .filter(|&k| gates[k] == inv);
            if let Some(k) = hit {
                gates.remove(k);
            } else {
                gates.push(g);
            }
        }
        Self { n: self.n, gates }
    }

    pub fn gate_counts(&self) -> GateCounts {
        self.gates.iter()
            .fold(GateCounts::default(), |mut acc, g| {
                match g {
                    Gate::H(..) => { acc.h += 1; },
                    Gate::S(..) => { acc.s += 1; },
                    Gate::SInv(..) => { acc.s_dag += 1; },
                    Gate::CX(..) => { acc.cx += 1; },
                }
                acc
            })
    }

    /// Number of two-qubit gates.
    pub fn two_qubit_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Number of layers when each gate is placed as early as the gates before
    /// it on the same qubits allow.
    pub fn depth(&self) -> usize {
        let mut levels: Vec<usize> = vec![0; self.n];
        for g in self.gates.iter() {
            match g.qubits() {
                (a, None) => { levels[a] += 1; },
                (a, Some(b)) => {
                    let l = levels[a].max(levels[b]) + 1;
                    levels[a] = l;
                    levels[b] = l;
                },
            }
        }
        levels.into_iter().max().unwrap_or(0)
    }

    /// Parse the text format described in the [module docs][self].
    ///
    /// The register size is one more than the highest target.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut circuit = Self::new(0);
        for (k, line) in text.lines().enumerate() {
            parse_line(line, &mut circuit).map_err(|e| e.at_line(k + 1))?;
        }
        Ok(circuit)
    }

    /// Sample a random circuit of `depth` layers on a 1D chain. Each layer is a
    /// random *H* or *S* on every qubit followed by a brick of nearest-neighbor
    /// `CX`s, starting from qubit 1 on odd layers.
    pub fn random_brickwork<R>(n: usize, depth: usize, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        let mut circuit = Self::new(n);
        for d in 0..depth {
            (0..n).for_each(|k| { circuit.push(Gate::sample_single(k, rng)); });
            Bricks::new(d % 2 == 1, n).for_each(|cx| { circuit.push(cx); });
        }
        circuit
    }
}

fn parse_line(line: &str, circuit: &mut Circuit) -> Result<(), ParseError> {
    let content = line.split('#').next().unwrap_or("");
    let mut words = content.split_whitespace();
    let Some(name) = words.next() else { return Ok(()); };
    let single: Option<fn(usize) -> Gate>
        = match name.to_ascii_uppercase().as_str() {
            "H" => Some(Gate::H),
            "S" => Some(Gate::S),
            "S_DAG" => Some(Gate::SInv),
            "CX" | "CNOT" => None,
            _ => { return Err(ParseError::UnknownGate(name.to_string())); },
        };
    let targets: Vec<usize>
        = words
        .map(|w| {
            w.parse::<usize>().ok()
                .filter(|&q| q < MAX_QUBITS)
                .ok_or_else(|| ParseError::InvalidTarget(w.to_string()))
        })
        .collect::<Result<_, _>>()?;
    if let Some(gate) = single {
        targets.into_iter().for_each(|q| { circuit.push(gate(q)); });
        return Ok(());
    }
    if targets.len() % 2 != 0 {
        return Err(ParseError::UnpairedTargets {
            gate: name.to_string(),
            count: targets.len(),
        });
    }
    for (a, b) in targets.into_iter().tuples() {
        if a == b {
            return Err(ParseError::RepeatedTarget { gate: name.to_string(), qubit: a });
        }
        circuit.push(Gate::CX(a, b));
    }
    Ok(())
}

// nearest-neighbor CX pairs (0, 1), (2, 3), ... or (1, 2), (3, 4), ...
struct Bricks {
    iter: std::ops::Range<usize>
}

impl Bricks {
    fn new(offs: bool, stop: usize) -> Self {
        Self { iter: if offs { 1 } else { 0 } .. stop }
    }
}

impl Iterator for Bricks {
    type Item = Gate;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
            .zip(self.iter.next())
            .map(|(a, b)| Gate::CX(a, b))
    }
}
