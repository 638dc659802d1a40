//! Gates whose operations belong to the *n*-qubit Clifford group, along with
//! the single-qubit Pauli letters and phase factors they act on.
//!
//! Synthesized circuits are written over the basis {*H*, *S*, *CX*}; the
//! inverse phase gate *S*<sup>†</sup> only appears inside inverted circuits and
//! is expanded to *S*<sup>3</sup> when a circuit is brought back to that basis.
//!
//! See also: <https://en.wikipedia.org/wiki/Clifford_gates>

use std::{
    fmt,
    ops::{ Div, DivAssign, Mul, MulAssign, Neg },
};
use rand::Rng;

/// A complex phase factor, limited to integer powers of **i**.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// +1
    #[default]
    Pi0,
    /// +i
    Pi1h,
    /// -1
    Pi,
    /// -i
    Pi3h,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Pi0 => write!(f, "+1"),
            Self::Pi1h => write!(f, "+i"),
            Self::Pi => write!(f, "-1"),
            Self::Pi3h => write!(f, "-i"),
        }
    }
}

impl Phase {
    /// Convert to the bare power of **i**.
    pub fn to_int(self) -> i8 {
        match self {
            Self::Pi0 => 0,
            Self::Pi1h => 1,
            Self::Pi => 2,
            Self::Pi3h => 3,
        }
    }

    /// Convert from a bare power of **i** (modulo 4).
    pub fn from_int(i: i8) -> Self {
        match i.rem_euclid(4) {
            0 => Self::Pi0,
            1 => Self::Pi1h,
            2 => Self::Pi,
            3 => Self::Pi3h,
            _ => unreachable!(),
        }
    }

    /// Return `true` for ±1.
    pub fn is_real(self) -> bool { matches!(self, Self::Pi0 | Self::Pi) }

    /// The sign of a real phase, or `None` for ±**i**.
    pub fn sign(self) -> Option<i8> {
        match self {
            Self::Pi0 => Some(1),
            Self::Pi => Some(-1),
            _ => None,
        }
    }

    /// Prefix used when writing a Pauli string: `+`, `-`, `+i`, or `-i`.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Pi0 => "+",
            Self::Pi1h => "+i",
            Self::Pi => "-",
            Self::Pi3h => "-i",
        }
    }
}

impl Neg for Phase {
    type Output = Self;

    fn neg(self) -> Self::Output { Self::from_int(self.to_int() + 2) }
}

macro_rules! impl_phase_math {
    (
        $trait:ident,
        $trait_fn:ident,
        $trait_assign:ident,
        $trait_assign_fn:ident,
        $op:tt
    ) => {
        impl $trait for Phase {
            type Output = Self;

            fn $trait_fn(self, rhs: Self) -> Self::Output {
                Self::from_int(self.to_int() $op rhs.to_int())
            }
        }

        impl $trait_assign for Phase {
            fn $trait_assign_fn(&mut self, rhs: Self) {
                *self = Self::from_int(self.to_int() $op rhs.to_int());
            }
        }
    }
}
// multiplying phases adds their exponents
impl_phase_math!(Mul, mul, MulAssign, mul_assign, +);
impl_phase_math!(Div, div, DivAssign, div_assign, -);

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "{}", if f.alternate() { "." } else { "I" }),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Pauli {
    /// Parse a single letter, accepting either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(Self::I),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Symplectic (X-bit, Z-bit) encoding; *Y* sets both.
    pub fn to_xz(self) -> (bool, bool) {
        match self {
            Self::I => (false, false),
            Self::X => (true, false),
            Self::Y => (true, true),
            Self::Z => (false, true),
        }
    }

    pub fn from_xz(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true, false) => Self::X,
            (true, true) => Self::Y,
            (false, true) => Self::Z,
        }
    }
}

/// Description of a single gate for a register of qubits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard
    H(usize),
    /// π/2 rotation about Z
    S(usize),
    /// -π/2 rotation about Z
    SInv(usize),
    /// Z-controlled π rotation about X.
    ///
    /// The first qubit index is the control.
    CX(usize, usize),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::H(k) | Self::S(k) | Self::SInv(k)
                => write!(f, "{} {}", self.name(), k),
            Self::CX(a, b) => write!(f, "{} {} {}", self.name(), a, b),
        }
    }
}

impl Gate {
    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H(..)) }

    /// Return `true` if `self` is `S`.
    pub fn is_s(&self) -> bool { matches!(self, Self::S(..)) }

    /// Return `true` if `self` is `SInv`.
    pub fn is_sinv(&self) -> bool { matches!(self, Self::SInv(..)) }

    /// Return `true` if `self` is `CX`.
    pub fn is_cx(&self) -> bool { matches!(self, Self::CX(..)) }

    /// Return `true` if `self` acts on two qubits.
    pub fn is_two_qubit(&self) -> bool { self.is_cx() }

    /// Instruction name in the line-oriented circuit format.
    pub fn name(&self) -> &'static str {
        match self {
            Self::H(..) => "H",
            Self::S(..) => "S",
            Self::SInv(..) => "S_DAG",
            Self::CX(..) => "CX",
        }
    }

    /// Qubit indices acted on, with the control first for `CX`.
    pub fn qubits(&self) -> (usize, Option<usize>) {
        match *self {
            Self::H(k) | Self::S(k) | Self::SInv(k) => (k, None),
            Self::CX(a, b) => (a, Some(b)),
        }
    }

    /// Return `true` if `self` acts on qubit `k`.
    pub fn acts_on(&self, k: usize) -> bool {
        match self.qubits() {
            (a, None) => a == k,
            (a, Some(b)) => a == k || b == k,
        }
    }

    /// Largest qubit index acted on.
    pub fn max_qubit(&self) -> usize {
        match self.qubits() {
            (a, None) => a,
            (a, Some(b)) => a.max(b),
        }
    }

    /// The gate undoing `self`.
    pub fn inverse(self) -> Self {
        match self {
            Self::S(k) => Self::SInv(k),
            Self::SInv(k) => Self::S(k),
            g => g,
        }
    }

    /// Sample a random single-qubit gate (`H` or `S`) for a given qubit index.
    pub fn sample_single<R>(idx: usize, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        if rng.gen::<bool>() { Self::H(idx) } else { Self::S(idx) }
    }
}
