//! Conserved quantities of a shell.

use sfera_basis::Conserved;

use crate::error::ModelError;
use crate::shell::Shell;

/// Total particle number `n`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell.
pub fn particle_number(nm: usize, nf: usize, n: i64) -> Result<Conserved, ModelError> {
    let shell = Shell::new(nm, nf)?;
    Ok(Conserved::new(vec![1; shell.num_orbitals()], n))
}

/// Total `2 L_z = lz2`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell.
pub fn twice_lz(nm: usize, nf: usize, lz2: i64) -> Result<Conserved, ModelError> {
    let shell = Shell::new(nm, nf)?;
    let charges = shell.orbitals().map(|(m, _)| shell.twice_m(m)).collect();
    Ok(Conserved::new(charges, lz2))
}

/// Number of particles `n` in the given flavors.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell and
/// [`ModelError::FlavorOutOfRange`] for an unknown flavor.
pub fn flavor_number(nm: usize, nf: usize, flavors: &[usize], n: i64) -> Result<Conserved, ModelError> {
    let shell = Shell::new(nm, nf)?;
    if let Some(&flavor) = flavors.iter().find(|&&f| f >= nf) {
        return Err(ModelError::FlavorOutOfRange { flavor, nf });
    }
    let charges = shell
        .orbitals()
        .map(|(_, f)| i64::from(flavors.contains(&f)))
        .collect();
    Ok(Conserved::new(charges, n))
}
