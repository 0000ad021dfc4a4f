//! Angular-momentum observables on a shell.
//!
//! With `m = m_index - s`,
//!
//! ```text
//! L_z = Σ m c†_{m f} c_{m f}
//! L⁺  = Σ √((s - m)(s + m + 1)) c†_{m+1 f} c_{m f}
//! L⁻  = (L⁺)†
//! L²  = L⁺ L⁻ + L_z² - L_z
//! ```

use sfera_terms::{NormalTerms, Simplifier, Term, TermSum};

use crate::error::ModelError;
use crate::shell::Shell;

fn lz_sum(shell: &Shell) -> TermSum {
    shell
        .orbitals()
        .filter(|&(m, _)| shell.twice_m(m) != 0)
        .map(|(m, f)| {
            #[allow(clippy::cast_precision_loss)]
            let lz = shell.twice_m(m) as f64 / 2.0;
            Term::density(shell.orbital(m, f)).scale(lz)
        })
        .collect()
}

fn lplus_sum(shell: &Shell) -> TermSum {
    let ts = shell.twice_s();
    (0..shell.nm() - 1)
        .flat_map(|m| (0..shell.nf()).map(move |f| (m, f)))
        .map(|(m, f)| {
            let tm = shell.twice_m(m);
            #[allow(clippy::cast_precision_loss)]
            let weight = (((ts - tm) * (ts + tm + 2)) as f64 / 4.0).sqrt();
            Term::one_body(shell.orbital(m + 1, f), shell.orbital(m, f)).scale(weight)
        })
        .collect()
}

/// Generates `L_z`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell.
pub fn lz_terms(nm: usize, nf: usize) -> Result<NormalTerms, ModelError> {
    let shell = Shell::new(nm, nf)?;
    Ok(Simplifier::new().simplify(&lz_sum(&shell))?)
}

/// Generates the raising operator `L⁺`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell.
pub fn lplus_terms(nm: usize, nf: usize) -> Result<NormalTerms, ModelError> {
    let shell = Shell::new(nm, nf)?;
    Ok(Simplifier::new().simplify(&lplus_sum(&shell))?)
}

/// Generates the lowering operator `L⁻`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell.
pub fn lminus_terms(nm: usize, nf: usize) -> Result<NormalTerms, ModelError> {
    let shell = Shell::new(nm, nf)?;
    Ok(Simplifier::new().simplify(&lplus_sum(&shell).conjugate())?)
}

/// Generates the total angular momentum `L² = L⁺ L⁻ + L_z² - L_z`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell.
pub fn l2_terms(nm: usize, nf: usize) -> Result<NormalTerms, ModelError> {
    let shell = Shell::new(nm, nf)?;
    let lz = lz_sum(&shell);
    let lplus = lplus_sum(&shell);
    let l2 = lplus.multiply(&lplus.conjugate()) + lz.multiply(&lz) - lz;
    Ok(Simplifier::new().simplify(&l2)?)
}
