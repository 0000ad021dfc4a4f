//! Errors raised during operator-matrix assembly and use.

use num_complex::Complex64;
use sfera_terms::TermError;
use thiserror::Error;

/// Errors that can occur while assembling or applying an operator matrix.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum OpMatError {
    /// A term is invalid for the basis.
    #[error(transparent)]
    Term(#[from] TermError),

    /// Bra and ket bases act on different numbers of orbitals.
    #[error("bra basis has {bra} orbitals, ket basis has {ket}")]
    OrbitalMismatch {
        /// Orbitals of the bra basis.
        bra: usize,
        /// Orbitals of the ket basis.
        ket: usize,
    },

    /// A vector does not match the matrix dimension.
    #[error("vector of length {found} does not match dimension {expected}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },

    /// A real-only assembly produced an entry with an imaginary part.
    #[error("entry ({row}, {col}) = {value} is not real")]
    ComplexEntry {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
        /// The offending value.
        value: Complex64,
    },

    /// The worker pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}
