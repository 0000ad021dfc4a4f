//! Symmetry-adapted many-body bases.
//!
//! Each basis vector is the normalized projection
//!
//! ```text
//! |v> ∝ Σ_g χ(g)* g |c>
//! ```
//!
//! of the smallest configuration `c` of a symmetry orbit, where `g` runs over
//! the abelian group generated by the sector symmetries and `χ` is the
//! character fixed by their eigenvalues. Orbits whose projection vanishes
//! carry no basis vector.

use log::debug;
use num_complex::Complex64;
use rustc_hash::FxHashMap;

use crate::confs::Confs;
use crate::error::BasisError;
use crate::symmetry::Sector;

/// Amplitudes below this norm are treated as cancelled.
const AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// A basis of many-body states over a configuration set.
#[derive(Clone, Debug)]
pub struct Basis {
    confs: Confs,
    offsets: Vec<usize>,
    members: Vec<(usize, Complex64)>,
    lookup: Vec<Option<(usize, Complex64)>>,
}

impl Basis {
    /// One basis state per configuration.
    #[must_use]
    pub fn trivial(confs: Confs) -> Self {
        let n = confs.len();
        let one = Complex64::new(1.0, 0.0);
        Self {
            offsets: (0..=n).collect(),
            members: (0..n).map(|i| (i, one)).collect(),
            lookup: (0..n).map(|i| Some((i, one))).collect(),
            confs,
        }
    }

    /// Builds the basis of the joint sector of `sectors`.
    ///
    /// The sector symmetries must commute; with no sectors this is
    /// [`Basis::trivial`].
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::OrbitalMismatch`] if a symmetry acts on a
    /// different number of orbitals than `confs`, and
    /// [`BasisError::SymmetryLeavesConfs`] if a symmetry maps a configuration
    /// outside `confs` or annihilates it.
    pub fn new(confs: Confs, sectors: &[Sector]) -> Result<Self, BasisError> {
        if sectors.is_empty() {
            return Ok(Self::trivial(confs));
        }
        for sector in sectors {
            let found = sector.symmetry().num_orbitals();
            if found != confs.num_orbitals() {
                return Err(BasisError::OrbitalMismatch {
                    expected: confs.num_orbitals(),
                    found,
                });
            }
        }

        let mut offsets = vec![0];
        let mut members = Vec::new();
        let mut lookup = vec![None; confs.len()];
        let mut visited = vec![false; confs.len()];
        let mut amplitudes: FxHashMap<usize, Complex64> = FxHashMap::default();

        for (start, &config) in confs.configs().iter().enumerate() {
            if visited[start] {
                continue;
            }

            amplitudes.clear();
            for (image, weight) in project(config, sectors)? {
                let idx = confs
                    .index_of(image)
                    .ok_or(BasisError::SymmetryLeavesConfs { config })?;
                visited[idx] = true;
                *amplitudes.entry(idx).or_default() += weight;
            }

            let mut orbit: Vec<(usize, Complex64)> = amplitudes
                .iter()
                .filter(|(_, a)| a.norm() > AMPLITUDE_TOLERANCE)
                .map(|(&i, &a)| (i, a))
                .collect();
            if orbit.is_empty() {
                continue;
            }
            orbit.sort_unstable_by_key(|&(i, _)| i);

            let norm = orbit.iter().map(|(_, a)| a.norm_sqr()).sum::<f64>().sqrt();
            let state = offsets.len() - 1;
            for (idx, amp) in orbit {
                let amp = amp / norm;
                lookup[idx] = Some((state, amp));
                members.push((idx, amp));
            }
            offsets.push(members.len());
        }

        debug!(
            "basis: {} configurations, {} sectors -> {} states",
            confs.len(),
            sectors.len(),
            offsets.len() - 1
        );

        Ok(Self {
            confs,
            offsets,
            members,
            lookup,
        })
    }

    /// Number of basis states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns true if the basis has no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying configurations.
    #[must_use]
    pub fn confs(&self) -> &Confs {
        &self.confs
    }

    /// Number of orbitals.
    #[must_use]
    pub fn num_orbitals(&self) -> usize {
        self.confs.num_orbitals()
    }

    /// Members of basis state `i` as `(configuration index, amplitude)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn state(&self, i: usize) -> &[(usize, Complex64)] {
        &self.members[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Basis state and amplitude of a configuration, if it takes part in one.
    #[must_use]
    pub fn lookup(&self, config: u64) -> Option<(usize, Complex64)> {
        self.confs
            .index_of(config)
            .and_then(|idx| self.lookup[idx])
    }

    /// Coordinates of the product state `|config>` projected onto this basis.
    ///
    /// The result is zero if the configuration belongs to an orbit with no
    /// basis vector.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::ConfigNotFound`] if `config` is not in the
    /// configuration set.
    pub fn state_from_config(&self, config: u64) -> Result<Vec<Complex64>, BasisError> {
        let idx = self
            .confs
            .index_of(config)
            .ok_or(BasisError::ConfigNotFound { config })?;
        let mut v = vec![Complex64::new(0.0, 0.0); self.len()];
        if let Some((state, amp)) = self.lookup[idx] {
            v[state] = amp.conj();
        }
        Ok(v)
    }

    /// Expands a vector in this basis into configuration amplitudes, indexed
    /// like [`Confs::configs`].
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::DimensionMismatch`] if `v` has the wrong length.
    pub fn to_configs(&self, v: &[Complex64]) -> Result<Vec<Complex64>, BasisError> {
        if v.len() != self.len() {
            return Err(BasisError::DimensionMismatch {
                expected: self.len(),
                found: v.len(),
            });
        }
        let mut out = vec![Complex64::new(0.0, 0.0); self.confs.len()];
        for (i, &coeff) in v.iter().enumerate() {
            for &(idx, amp) in self.state(i) {
                out[idx] += coeff * amp;
            }
        }
        Ok(out)
    }
}

/// Images `(g c, χ(g)* phase_g)` of a configuration over the whole group.
fn project(config: u64, sectors: &[Sector]) -> Result<Vec<(u64, Complex64)>, BasisError> {
    let mut images = vec![(config, Complex64::new(1.0, 0.0))];
    for sector in sectors {
        let g = sector.symmetry();
        let chi = sector.eigenvalue().conj();
        let mut next = Vec::with_capacity(images.len() * g.cycle() as usize);
        for &(c, weight) in &images {
            let (mut cur, mut w) = (c, weight);
            for _ in 0..g.cycle() {
                next.push((cur, w));
                let (img, phase) = g
                    .apply(cur)
                    .ok_or(BasisError::SymmetryLeavesConfs { config: cur })?;
                cur = img;
                w *= phase * chi;
            }
        }
        images = next;
    }
    Ok(images)
}
