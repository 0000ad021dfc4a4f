//! Errors raised while building configurations and bases.

use num_complex::Complex64;
use thiserror::Error;

/// Errors that can occur while enumerating configurations or building a basis.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BasisError {
    /// Configurations are 64-bit masks.
    #[error("{num_orbitals} orbitals exceed the 64-orbital limit")]
    TooManyOrbitals {
        /// Requested number of orbitals.
        num_orbitals: usize,
    },

    /// A charge or phase vector does not have one entry per orbital.
    #[error("expected {expected} per-orbital entries, found {found}")]
    LengthMismatch {
        /// Number of orbitals.
        expected: usize,
        /// Length supplied.
        found: usize,
    },

    /// A modular conserved quantity has modulus zero.
    #[error("modulus of a conserved quantity must be positive")]
    ZeroModulus,

    /// A symmetry's orbital map is not a permutation.
    #[error("orbital map is not a permutation of 0..{num_orbitals}")]
    InvalidPermutation {
        /// Number of orbitals.
        num_orbitals: usize,
    },

    /// A symmetry phase is zero or not finite.
    #[error("invalid symmetry phase {0}")]
    InvalidPhase(Complex64),

    /// A symmetry has cycle zero.
    #[error("symmetry cycle must be positive")]
    ZeroCycle,

    /// A sector eigenvalue is not a root of unity of the symmetry's cycle.
    #[error("eigenvalue {eigenvalue} is not a {cycle}-th root of unity")]
    NotRootOfUnity {
        /// The requested eigenvalue.
        eigenvalue: Complex64,
        /// The symmetry cycle.
        cycle: u32,
    },

    /// Symmetry and configurations disagree on the number of orbitals.
    #[error("symmetry acts on {found} orbitals, configurations have {expected}")]
    OrbitalMismatch {
        /// Orbitals of the configurations.
        expected: usize,
        /// Orbitals of the symmetry.
        found: usize,
    },

    /// A symmetry maps a configuration outside the enumerated set.
    #[error("symmetry maps configuration {config:#b} outside the configuration set")]
    SymmetryLeavesConfs {
        /// The configuration being transformed.
        config: u64,
    },

    /// A configuration is not part of the set.
    #[error("configuration {config:#b} is not in the configuration set")]
    ConfigNotFound {
        /// The missing configuration.
        config: u64,
    },

    /// A vector does not match the basis dimension.
    #[error("vector of length {found} does not match dimension {expected}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
}
