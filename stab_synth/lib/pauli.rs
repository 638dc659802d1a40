//! *n*-qubit Pauli operators in the binary symplectic representation.
//!
//! An operator is stored as two bit vectors `xs` and `zs` of equal length plus
//! an overall [`Phase`]. Qubit *k* carries *X* if only `xs[k]` is set, *Z* if
//! only `zs[k]` is set, *Y* if both are set, and the identity otherwise. Note
//! that *Y* here is the Hermitian Pauli matrix σ<sub>*y*</sub> = **i** *XZ*, so
//! every sign/phase rule below is written for that convention.
//!
//! Operators are values: every operation returns a new operator and leaves its
//! inputs untouched.

use std::{ fmt, str::FromStr };
use crate::{
    error::ParseError,
    gate::{ Gate, Pauli, Phase },
};

/// An *n*-qubit Pauli operator with a phase in {±1, ±**i**}.
///
/// Operators parsed from text, and every stabilizer generator, carry a real
/// phase (±1); imaginary phases only arise from products of anticommuting
/// operators.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PauliOperator {
    xs: Vec<bool>,
    zs: Vec<bool>,
    phase: Phase,
}

impl fmt::Display for PauliOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phase.prefix())?;
        self.iter().try_for_each(|p| fmt::Display::fmt(&p, f))
    }
}

impl FromStr for PauliOperator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

// power of i picked up by the product p1 * p2 of two single-qubit Paulis
fn mul_exponent(x1: bool, z1: bool, x2: bool, z2: bool) -> i8 {
    let (x2, z2) = (i8::from(x2), i8::from(z2));
    match (x1, z1) {
        (false, false) => 0,
        (true, true) => z2 - x2,
        (true, false) => z2 * (2 * x2 - 1),
        (false, true) => x2 * (1 - 2 * z2),
    }
}

impl PauliOperator {
    /// Construct directly from symplectic bit vectors.
    ///
    /// *Panics if `xs` and `zs` have different lengths.*
    pub fn from_xz(xs: Vec<bool>, zs: Vec<bool>, phase: Phase) -> Self {
        assert_eq!(
            xs.len(), zs.len(),
            "PauliOperator::from_xz: X and Z parts must have equal length",
        );
        Self { xs, zs, phase }
    }

    /// Construct from a sequence of single-qubit Paulis.
    pub fn from_paulis<I>(ops: I, phase: Phase) -> Self
    where I: IntoIterator<Item = Pauli>
    {
        let (xs, zs): (Vec<bool>, Vec<bool>)
            = ops.into_iter().map(Pauli::to_xz).unzip();
        Self { xs, zs, phase }
    }

    /// The identity on `n` qubits, with phase +1.
    pub fn identity(n: usize) -> Self {
        Self { xs: vec![false; n], zs: vec![false; n], phase: Phase::Pi0 }
    }

    /// A weight-one operator: `op` on qubit `k`, identity elsewhere.
    ///
    /// *Panics if `k >= n`.*
    pub fn single(n: usize, k: usize, op: Pauli) -> Self {
        let mut new = Self::identity(n);
        let (x, z) = op.to_xz();
        new.xs[k] = x;
        new.zs[k] = z;
        new
    }

    /// Parse a string like `-XZZXI`.
    ///
    /// Letters may be upper- or lowercase; a single leading `+` or `-` sets the
    /// sign, which otherwise defaults to `+`. Surrounding whitespace is
    /// ignored. The `index` of an [`InvalidCharacter`][ParseError::InvalidCharacter]
    /// error counts Pauli letters, not including the sign prefix.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let (phase, letters)
            = if let Some(rest) = s.strip_prefix('+') {
                (Phase::Pi0, rest)
            } else if let Some(rest) = s.strip_prefix('-') {
                (Phase::Pi, rest)
            } else {
                (Phase::Pi0, s)
            };
        if letters.is_empty() { return Err(ParseError::Empty); }
        let ops: Vec<Pauli>
            = letters.chars().enumerate()
            .map(|(index, c)| {
                Pauli::from_char(c)
                    .ok_or(ParseError::InvalidCharacter { index, char: c })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self::from_paulis(ops, phase))
    }

    /// Number of qubits.
    pub fn len(&self) -> usize { self.xs.len() }

    pub fn is_empty(&self) -> bool { self.xs.is_empty() }

    /// X-bit on qubit `k`.
    pub fn x(&self, k: usize) -> bool { self.xs[k] }

    /// Z-bit on qubit `k`.
    pub fn z(&self, k: usize) -> bool { self.zs[k] }

    pub fn xs(&self) -> &[bool] { &self.xs }

    pub fn zs(&self) -> &[bool] { &self.zs }

    pub fn phase(&self) -> Phase { self.phase }

    /// Overall sign, or `None` if the phase is imaginary.
    pub fn sign(&self) -> Option<i8> { self.phase.sign() }

    /// The single-qubit Pauli on qubit `k`.
    pub fn pauli(&self, k: usize) -> Pauli { Pauli::from_xz(self.xs[k], self.zs[k]) }

    /// Iterate over single-qubit Paulis.
    pub fn iter(&self) -> impl Iterator<Item = Pauli> + '_ {
        self.xs.iter().zip(&self.zs).map(|(&x, &z)| Pauli::from_xz(x, z))
    }

    /// Number of non-identity qubits.
    pub fn weight(&self) -> usize {
        self.xs.iter().zip(&self.zs).filter(|&(&x, &z)| x || z).count()
    }

    /// Return `true` if every qubit is the identity, regardless of phase.
    pub fn is_identity(&self) -> bool { self.weight() == 0 }

    /// Return `true` if no qubit carries an X-bit, i.e. the operator is a
    /// product of *Z*s and identities (with any phase).
    pub fn is_z_type(&self) -> bool { self.xs.iter().all(|x| !x) }

    /// Return `true` if `self` and `other` differ at most by their phases.
    pub fn eq_up_to_phase(&self, other: &Self) -> bool {
        self.xs == other.xs && self.zs == other.zs
    }

    /// Copy with a different phase.
    pub fn with_phase(&self, phase: Phase) -> Self {
        Self { xs: self.xs.clone(), zs: self.zs.clone(), phase }
    }

    /// Copy acting on `n >= self.len()` qubits, with identities on the extra
    /// ones. Returns a plain copy if `n <= self.len()`.
    pub fn padded(&self, n: usize) -> Self {
        let mut new = self.clone();
        if n > new.len() {
            new.xs.resize(n, false);
            new.zs.resize(n, false);
        }
        new
    }

    /// The row `[xs | zs]` of length `2 * len` used by the GF(2) engine.
    pub fn symplectic_row(&self) -> Vec<bool> {
        self.xs.iter().chain(&self.zs).copied().collect()
    }

    /// Inverse of [`Self::symplectic_row`].
    ///
    /// *Panics if `row` has odd length.*
    pub fn from_symplectic_row(row: &[bool], phase: Phase) -> Self {
        assert!(row.len() % 2 == 0, "symplectic row must have even length");
        let n = row.len() / 2;
        Self { xs: row[..n].to_vec(), zs: row[n..].to_vec(), phase }
    }

    /// Test whether `self` and `other` commute, via the symplectic inner
    /// product Σ<sub>*k*</sub> (*x*<sub>*k*</sub>*z'*<sub>*k*</sub> +
    /// *z*<sub>*k*</sub>*x'*<sub>*k*</sub>) mod 2.
    pub fn commutes(&self, other: &Self) -> Result<bool, ParseError> {
        if self.len() != other.len() {
            return Err(ParseError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        let odd
            = self.xs.iter().zip(&self.zs)
            .zip(other.xs.iter().zip(&other.zs))
            .filter(|&((&xa, &za), (&xb, &zb))| (xa && zb) ^ (za && xb))
            .count() % 2 == 1;
        Ok(!odd)
    }

    /// Operator product `self * other`, with the phase accumulated qubit by
    /// qubit (e.g. *XY* = **i***Z*, *XZ* = -**i***Y*).
    ///
    /// *Panics if the operators have different lengths.*
    pub fn multiply(&self, other: &Self) -> Self {
        assert_eq!(
            self.len(), other.len(),
            "PauliOperator::multiply: operators must act on the same qubits",
        );
        let mut e: i8 = self.phase.to_int() + other.phase.to_int();
        let mut xs: Vec<bool> = Vec::with_capacity(self.len());
        let mut zs: Vec<bool> = Vec::with_capacity(self.len());
        for ((&x1, &z1), (&x2, &z2)) in
            self.xs.iter().zip(&self.zs).zip(other.xs.iter().zip(&other.zs))
        {
            e = (e + mul_exponent(x1, z1, x2, z2)).rem_euclid(4);
            xs.push(x1 ^ x2);
            zs.push(z1 ^ z2);
        }
        Self { xs, zs, phase: Phase::from_int(e) }
    }

    /// Heisenberg update *P* ↦ *U P U*<sup>†</sup> for a single gate *U*.
    ///
    /// - *H*: swaps the X- and Z-bits of its qubit (*Y* ↦ -*Y*).
    /// - *S*: *X* ↦ *Y*, *Y* ↦ -*X*, *Z* ↦ *Z*.
    /// - *S*<sup>†</sup>: *X* ↦ -*Y*, *Y* ↦ *X*, *Z* ↦ *Z*.
    /// - *CX*: *X*<sub>c</sub> ↦ *X*<sub>c</sub>*X*<sub>t</sub>,
    ///   *Z*<sub>t</sub> ↦ *Z*<sub>c</sub>*Z*<sub>t</sub>.
    ///
    /// *Panics if the gate acts on a qubit index `>= self.len()`.*
    pub fn conjugate_by_gate(&self, gate: Gate) -> Self {
        let mut new = self.clone();
        new.conjugate_in_place(gate);
        new
    }

    pub(crate) fn conjugate_in_place(&mut self, gate: Gate) {
        match gate {
            Gate::H(k) => {
                if self.xs[k] && self.zs[k] { self.phase = -self.phase; }
                std::mem::swap(&mut self.xs[k], &mut self.zs[k]);
            },
            Gate::S(k) => {
                if self.xs[k] && self.zs[k] { self.phase = -self.phase; }
                self.zs[k] ^= self.xs[k];
            },
            Gate::SInv(k) => {
                self.zs[k] ^= self.xs[k];
                if self.xs[k] && self.zs[k] { self.phase = -self.phase; }
            },
            Gate::CX(c, t) => {
                if self.xs[c] && self.zs[t] && (self.xs[t] == self.zs[c]) {
                    self.phase = -self.phase;
                }
                self.xs[t] ^= self.xs[c];
                self.zs[c] ^= self.zs[t];
            },
        }
    }
}
