//! Errors raised by the model generators.

use sfera_basis::BasisError;
use sfera_terms::TermError;
use thiserror::Error;

/// Errors that can occur while generating model terms or symmetries.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ModelError {
    /// The shell has no orbitals or no flavors.
    #[error("a shell needs at least one orbital and one flavor (nm = {nm}, nf = {nf})")]
    EmptyShell {
        /// Number of orbitals per flavor.
        nm: usize,
        /// Number of flavors.
        nf: usize,
    },

    /// The Sp(N) Casimir needs an even number of flavors.
    #[error("Sp(N) needs an even number of flavors, got {nf}")]
    OddFlavors {
        /// Number of flavors.
        nf: usize,
    },

    /// A flavor matrix is not `nf × nf`.
    #[error("flavor matrix must be {expected}x{expected}, found a row or column of length {found}")]
    MatrixSize {
        /// Number of flavors.
        expected: usize,
        /// Offending length.
        found: usize,
    },

    /// More pseudopotentials than angular-momentum channels.
    #[error("{count} pseudopotentials given, at most {max} channels exist")]
    TooManyPseudopotentials {
        /// Number supplied.
        count: usize,
        /// Number of channels, equal to `nm`.
        max: usize,
    },

    /// A flavor map is not a permutation of `0..nf`.
    #[error("flavor map is not a permutation of 0..{nf}")]
    InvalidFlavorPermutation {
        /// Number of flavors.
        nf: usize,
    },

    /// A flavor index is out of range.
    #[error("flavor {flavor} out of range for {nf} flavors")]
    FlavorOutOfRange {
        /// The flavor.
        flavor: usize,
        /// Number of flavors.
        nf: usize,
    },

    /// No small power of the symmetry is the identity.
    #[error("symmetry has no finite cycle up to {limit}")]
    NoFiniteCycle {
        /// Largest cycle tried.
        limit: u32,
    },

    /// Simplifying the generated terms failed.
    #[error(transparent)]
    Term(#[from] TermError),

    /// Building a symmetry or conserved quantity failed.
    #[error(transparent)]
    Basis(#[from] BasisError),
}
