//! Discrete symmetries acting on configurations.
//!
//! A symmetry `g` maps orbitals to orbitals with a phase:
//!
//! ```text
//! g c†_o g⁻¹ = fac(o) c†_{perm(o)}      (ordinary orbital)
//! g c†_o g⁻¹ = fac(o) c_{perm(o)}       (particle-hole orbital)
//! g |0>      = Π c†_{perm(p)} |0>       over particle-hole p, ascending
//! ```
//!
//! Applying `g` to `|c> = c†_{o1} ... c†_{ok} |0>` therefore gives a single
//! configuration times a phase, or nothing.

use num_complex::Complex64;

use crate::error::BasisError;
use crate::fock::{apply_string, MAX_ORBITALS};
use sfera_terms::Op;

/// Tolerance used when checking that an eigenvalue is a root of unity.
const ROOT_TOLERANCE: f64 = 1e-10;

/// A symmetry transformation of finite cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Symmetry {
    perm: Vec<usize>,
    phases: Vec<Complex64>,
    particle_hole: Vec<bool>,
    cycle: u32,
    vacuum: u64,
    vacuum_sign: f64,
}

impl Symmetry {
    /// Creates a symmetry from its orbital map, per-orbital phases,
    /// particle-hole flags and cycle (`g^cycle = 1`).
    ///
    /// # Errors
    ///
    /// Returns an error if `perm` is not a permutation, the per-orbital vectors
    /// have the wrong length, a phase is zero or not finite, or `cycle` is zero.
    pub fn new(
        perm: Vec<usize>,
        phases: Vec<Complex64>,
        particle_hole: Vec<bool>,
        cycle: u32,
    ) -> Result<Self, BasisError> {
        let n = perm.len();
        if n > MAX_ORBITALS {
            return Err(BasisError::TooManyOrbitals { num_orbitals: n });
        }
        for len in [phases.len(), particle_hole.len()] {
            if len != n {
                return Err(BasisError::LengthMismatch {
                    expected: n,
                    found: len,
                });
            }
        }
        let mut seen = vec![false; n];
        for &p in &perm {
            if p >= n || std::mem::replace(&mut seen[p], true) {
                return Err(BasisError::InvalidPermutation { num_orbitals: n });
            }
        }
        if let Some(&bad) = phases.iter().find(|f| !f.is_finite() || f.norm() == 0.0) {
            return Err(BasisError::InvalidPhase(bad));
        }
        if cycle == 0 {
            return Err(BasisError::ZeroCycle);
        }

        let filling: Vec<Op> = perm
            .iter()
            .zip(&particle_hole)
            .filter(|&(_, &ph)| ph)
            .map(|(&p, _)| Op::creation(p))
            .collect();
        let (vacuum, vacuum_sign) = apply_string(&filling, 0)
            .ok_or(BasisError::InvalidPermutation { num_orbitals: n })?;

        Ok(Self {
            perm,
            phases,
            particle_hole,
            cycle,
            vacuum,
            vacuum_sign,
        })
    }

    /// A pure orbital permutation with unit phases.
    ///
    /// # Errors
    ///
    /// See [`Symmetry::new`].
    pub fn permutation(perm: Vec<usize>, cycle: u32) -> Result<Self, BasisError> {
        let n = perm.len();
        Self::new(perm, vec![Complex64::new(1.0, 0.0); n], vec![false; n], cycle)
    }

    /// Number of orbitals acted on.
    #[must_use]
    pub fn num_orbitals(&self) -> usize {
        self.perm.len()
    }

    /// The orbital map.
    #[must_use]
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// Per-orbital phases.
    #[must_use]
    pub fn phases(&self) -> &[Complex64] {
        &self.phases
    }

    /// Per-orbital particle-hole flags.
    #[must_use]
    pub fn particle_hole(&self) -> &[bool] {
        &self.particle_hole
    }

    /// Smallest `n` with `g^n = 1`, as declared.
    #[must_use]
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Image of the vacuum.
    #[must_use]
    pub fn vacuum_image(&self) -> u64 {
        self.vacuum
    }

    /// Sign of the vacuum image relative to the ascending product state.
    #[must_use]
    pub fn vacuum_sign(&self) -> f64 {
        self.vacuum_sign
    }

    /// Applies the symmetry to a configuration.
    ///
    /// Returns the image configuration and its phase, or `None` if the
    /// transformed operators annihilate the transformed vacuum.
    #[must_use]
    pub fn apply(&self, config: u64) -> Option<(u64, Complex64)> {
        let mut phase = Complex64::new(1.0, 0.0);
        let mut ops = Vec::with_capacity(config.count_ones() as usize);
        for o in crate::fock::occupied_orbitals(config) {
            let target = *self.perm.get(o)?;
            phase *= self.phases[o];
            ops.push(if self.particle_hole[o] {
                Op::annihilation(target)
            } else {
                Op::creation(target)
            });
        }
        let (image, sign) = apply_string(&ops, self.vacuum)?;
        Some((image, phase * (sign * self.vacuum_sign)))
    }

    /// Applies the symmetry `power` times.
    #[must_use]
    pub fn apply_pow(&self, config: u64, power: u32) -> Option<(u64, Complex64)> {
        (0..power).try_fold((config, Complex64::new(1.0, 0.0)), |(c, phase), _| {
            self.apply(c).map(|(next, f)| (next, phase * f))
        })
    }
}

/// A symmetry sector: states with eigenvalue `eigenvalue` under `symmetry`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    symmetry: Symmetry,
    eigenvalue: Complex64,
}

impl Sector {
    /// Creates a sector.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::NotRootOfUnity`] unless `eigenvalue^cycle = 1`.
    pub fn new(symmetry: Symmetry, eigenvalue: impl Into<Complex64>) -> Result<Self, BasisError> {
        let eigenvalue = eigenvalue.into();
        let cycle = symmetry.cycle;
        let power = eigenvalue.powu(cycle);
        if !eigenvalue.is_finite() || (power - 1.0).norm() > ROOT_TOLERANCE {
            return Err(BasisError::NotRootOfUnity { eigenvalue, cycle });
        }
        Ok(Self {
            symmetry,
            eigenvalue,
        })
    }

    /// The symmetry.
    #[must_use]
    pub fn symmetry(&self) -> &Symmetry {
        &self.symmetry
    }

    /// The eigenvalue.
    #[must_use]
    pub fn eigenvalue(&self) -> Complex64 {
        self.eigenvalue
    }
}
