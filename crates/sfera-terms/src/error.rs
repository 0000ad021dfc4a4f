//! Errors raised at term construction and validation boundaries.

use thiserror::Error;

/// Errors that can occur while building or simplifying terms.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TermError {
    /// A flat operator encoding has an odd number of entries.
    #[error("operator string has odd flat length {len}")]
    OddLength {
        /// Number of integers in the flat encoding.
        len: usize,
    },

    /// A flat operator encoding contains an unknown kind code.
    #[error("unknown operator kind code {code} at position {position}")]
    UnknownKind {
        /// The offending kind code.
        code: i64,
        /// Position of the operator in the string.
        position: usize,
    },

    /// An orbital index is negative or beyond the number of orbitals.
    #[error("orbital {orbital} out of range (number of orbitals: {num_orbitals})")]
    OrbitalOutOfRange {
        /// The offending orbital index.
        orbital: i64,
        /// Number of orbitals the term was validated against.
        num_orbitals: usize,
    },

    /// A coefficient is NaN or infinite.
    #[error("non-finite coefficient {re} + {im}i")]
    NumericDegenerate {
        /// Real part of the coefficient.
        re: f64,
        /// Imaginary part of the coefficient.
        im: f64,
    },

    /// A negligibility threshold is negative or not finite.
    #[error("invalid threshold {threshold}")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },
}

impl TermError {
    /// Returns true for the structural (`InvalidTerm`) family of errors.
    #[must_use]
    pub fn is_invalid_term(&self) -> bool {
        !matches!(
            self,
            TermError::NumericDegenerate { .. } | TermError::InvalidThreshold { .. }
        )
    }
}
