//! Error types for parsing, set construction, completion, and synthesis.
//!
//! Verification never fails; a generator that is not preserved is reported as
//! a normal entry in a [`VerificationReport`][crate::verify::VerificationReport].

use thiserror::Error;

/// Malformed text input, or operators of mismatched lengths within a single
/// problem instance.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character outside `I`/`X`/`Y`/`Z` (either case) in a Pauli string.
    ///
    /// `index` counts characters after any leading sign prefix.
    #[error("invalid Pauli character {char:?} at index {index}")]
    InvalidCharacter { index: usize, char: char },

    /// A Pauli string with no qubits.
    #[error("empty Pauli string")]
    Empty,

    /// Two operators in the same problem instance act on different numbers of
    /// qubits.
    #[error("expected an operator on {expected} qubits, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A stabilizer file containing no generators.
    #[error("no stabilizer generators given")]
    NoGenerators,

    /// An instruction name in a circuit file that isn't `H`, `S`, `S_DAG`, or
    /// `CX`/`CNOT`.
    #[error("unknown gate {0:?}")]
    UnknownGate(String),

    /// A circuit target that isn't a non-negative integer.
    #[error("invalid qubit target {0:?}")]
    InvalidTarget(String),

    /// A two-qubit instruction with an odd number of targets.
    #[error("gate {gate} takes targets in pairs, got {count}")]
    UnpairedTargets { gate: String, count: usize },

    /// A two-qubit instruction whose control and target coincide.
    #[error("gate {gate} applied with qubit {qubit} as both control and target")]
    RepeatedTarget { gate: String, qubit: usize },

    /// Any of the above, located at a (1-based) line of a text file.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Attach a 1-based line number.
    pub fn at_line(self, line: usize) -> Self {
        Self::Line { line, source: Box::new(self) }
    }

    /// Strip any line annotation.
    pub fn root(&self) -> &Self {
        match self {
            Self::Line { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Everything that can go wrong between parsed generators and a circuit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SynthError {
    /// Malformed input.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Two supplied generators anticommute, so no state is stabilized by both.
    #[error("generators {first} and {second} anticommute")]
    AnticommutingGenerators { first: usize, second: usize },

    /// A supplied generator is a product of earlier ones and strict
    /// independence was requested.
    #[error("generator {index} is a product of earlier generators")]
    DependentGenerators { index: usize },

    /// A supplied generator equals a product of earlier ones up to a sign, so
    /// the set would also stabilize `-I`.
    #[error("generator {index} contradicts the sign implied by earlier generators")]
    InconsistentSigns { index: usize },

    /// Completion search ran out of trials before reaching a full set.
    #[error("found only {found} of {needed} generators within the completion search bound")]
    IncompleteGeneratorSet { found: usize, needed: usize },

    /// The synthesizer was handed a set that does not determine a state; no
    /// remaining generator has support on `column`.
    #[error("generator set is rank-deficient at column {column}")]
    RankDeficiency { column: usize },

    /// The completion search was cancelled through its token.
    #[error("completion search was cancelled")]
    Cancelled,
}

/// Stable classification of a [`SynthError`], used for machine-readable
/// reporting at the process boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    Anticommuting,
    Dependent,
    InconsistentSigns,
    Incomplete,
    RankDeficiency,
    Cancelled,
}

impl ErrorKind {
    /// Short identifier printed by the command-line tools.
    pub fn code(self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Anticommuting => "anticommuting",
            Self::Dependent => "dependent",
            Self::InconsistentSigns => "inconsistent-signs",
            Self::Incomplete => "incomplete",
            Self::RankDeficiency => "rank-deficiency",
            Self::Cancelled => "cancelled",
        }
    }
}

impl SynthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::AnticommutingGenerators { .. } => ErrorKind::Anticommuting,
            Self::DependentGenerators { .. } => ErrorKind::Dependent,
            Self::InconsistentSigns { .. } => ErrorKind::InconsistentSigns,
            Self::IncompleteGeneratorSet { .. } => ErrorKind::Incomplete,
            Self::RankDeficiency { .. } => ErrorKind::RankDeficiency,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

pub type SynthResult<T> = Result<T, SynthError>;
