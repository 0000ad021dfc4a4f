//! Lowest-Landau-level orbital indexing.
//!
//! A shell of `nm = 2s + 1` orbitals per flavor and `nf` flavors has orbitals
//! `o = m_index * nf + f`, where `m = m_index - s`. Angular momenta are kept
//! doubled (`2m`, `2s`) so they stay integers.

use crate::error::ModelError;

/// A fuzzy-sphere shell of `nm` orbitals for each of `nf` flavors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shell {
    nm: usize,
    nf: usize,
}

impl Shell {
    /// Creates a shell.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyShell`] if `nm` or `nf` is zero.
    pub fn new(nm: usize, nf: usize) -> Result<Self, ModelError> {
        if nm == 0 || nf == 0 {
            return Err(ModelError::EmptyShell { nm, nf });
        }
        Ok(Self { nm, nf })
    }

    /// Orbitals per flavor.
    #[must_use]
    pub fn nm(&self) -> usize {
        self.nm
    }

    /// Number of flavors.
    #[must_use]
    pub fn nf(&self) -> usize {
        self.nf
    }

    /// Total number of orbitals.
    #[must_use]
    pub fn num_orbitals(&self) -> usize {
        self.nm * self.nf
    }

    /// Orbital index of `(m_index, f)`.
    #[must_use]
    pub fn orbital(&self, m_index: usize, f: usize) -> usize {
        m_index * self.nf + f
    }

    /// `2s = nm - 1`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn twice_s(&self) -> i64 {
        self.nm as i64 - 1
    }

    /// `2m` of an orbital index.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn twice_m(&self, m_index: usize) -> i64 {
        2 * m_index as i64 - self.twice_s()
    }

    /// Orbital indices `(m_index, f)` in orbital order.
    pub fn orbitals(&self) -> impl Iterator<Item = (usize, usize)> {
        let nf = self.nf;
        (0..self.num_orbitals()).map(move |o| (o / nf, o % nf))
    }
}
