//! Discrete symmetries of a shell.
//!
//! The declared cycle of each symmetry is the smallest power that acts as
//! the identity on the vacuum and on every single-particle state, which makes
//! it the identity on the whole Fock space.

use num_complex::Complex64;
use sfera_basis::Symmetry;

use crate::error::ModelError;
use crate::shell::Shell;

/// Powers of the base period tried before giving up.
const MAX_PERIODS: u32 = 4;

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Order of a permutation.
fn order(perm: &[usize]) -> u32 {
    let mut seen = vec![false; perm.len()];
    let mut lcm = 1;
    for start in 0..perm.len() {
        let mut len = 0u32;
        let mut o = start;
        while !seen[o] {
            seen[o] = true;
            o = perm[o];
            len += 1;
        }
        if len > 0 {
            lcm = lcm / gcd(lcm, len) * len;
        }
    }
    lcm
}

fn acts_trivially(g: &Symmetry, power: u32) -> bool {
    let fixes = |config: u64| {
        g.apply_pow(config, power)
            .is_some_and(|(image, phase)| image == config && (phase - 1.0).norm() < 1e-12)
    };
    fixes(0) && (0..g.num_orbitals()).all(|o| fixes(1 << o))
}

/// Builds a symmetry whose cycle is found by closing its powers.
fn closed_symmetry(
    perm: Vec<usize>,
    phases: Vec<Complex64>,
    particle_hole: Vec<bool>,
) -> Result<Symmetry, ModelError> {
    let base = {
        let k = order(&perm);
        if particle_hole.iter().any(|&ph| ph) && k % 2 == 1 {
            2 * k
        } else {
            k
        }
    };
    let trial = Symmetry::new(perm, phases, particle_hole, base)?;
    let cycle = (1..=MAX_PERIODS)
        .map(|p| p * base)
        .find(|&k| acts_trivially(&trial, k))
        .ok_or(ModelError::NoFiniteCycle {
            limit: MAX_PERIODS * base,
        })?;
    Ok(Symmetry::new(
        trial.perm().to_vec(),
        trial.phases().to_vec(),
        trial.particle_hole().to_vec(),
        cycle,
    )?)
}

fn check_flavor_permutation(nf: usize, perm: &[usize]) -> Result<(), ModelError> {
    let mut seen = vec![false; nf];
    if perm.len() != nf
        || perm
            .iter()
            .any(|&f| f >= nf || std::mem::replace(&mut seen[f], true))
    {
        return Err(ModelError::InvalidFlavorPermutation { nf });
    }
    Ok(())
}

/// Flavor permutation `c†_{m f} → c†_{m perm(f)}`.
///
/// # Errors
///
/// Returns [`ModelError::InvalidFlavorPermutation`] if `perm` is not a
/// permutation of `0..nf`, and [`ModelError::Basis`] beyond 64 orbitals.
pub fn flavor_permutation(nm: usize, nf: usize, perm: &[usize]) -> Result<Symmetry, ModelError> {
    let shell = Shell::new(nm, nf)?;
    check_flavor_permutation(nf, perm)?;
    let n = shell.num_orbitals();
    let map = shell.orbitals().map(|(m, f)| shell.orbital(m, perm[f])).collect();
    closed_symmetry(map, vec![Complex64::new(1.0, 0.0); n], vec![false; n])
}

/// Particle-hole transformation `c†_{m f} → c_{m perm(f)}`.
///
/// # Errors
///
/// See [`flavor_permutation`].
pub fn particle_hole(nm: usize, nf: usize, perm: &[usize]) -> Result<Symmetry, ModelError> {
    let shell = Shell::new(nm, nf)?;
    check_flavor_permutation(nf, perm)?;
    let n = shell.num_orbitals();
    let map = shell.orbitals().map(|(m, f)| shell.orbital(m, perm[f])).collect();
    closed_symmetry(map, vec![Complex64::new(1.0, 0.0); n], vec![true; n])
}

/// π rotation about the y axis, `c†_{m f} → ±c†_{-m f}`.
///
/// The phase is `(-1)^{m_index}` for integer `s` and `i (-1)^{m_index}` for
/// half-integer `s`. This differs from the rotation matrix by a global phase
/// per particle and makes the transformation square to the identity.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell and
/// [`ModelError::Basis`] beyond 64 orbitals.
pub fn rotation_y(nm: usize, nf: usize) -> Result<Symmetry, ModelError> {
    let shell = Shell::new(nm, nf)?;
    let n = shell.num_orbitals();
    let unit = if nm % 2 == 1 {
        Complex64::new(1.0, 0.0)
    } else {
        Complex64::new(0.0, 1.0)
    };
    let map = shell.orbitals().map(|(m, f)| shell.orbital(nm - 1 - m, f)).collect();
    let phases = shell
        .orbitals()
        .map(|(m, _)| if m % 2 == 0 { unit } else { -unit })
        .collect();
    closed_symmetry(map, phases, vec![false; n])
}
