//! Density-density interactions and flavor polarizations.

use log::debug;
use num_complex::Complex64;
use sfera_terms::{NormalTerms, Simplifier, Term, TermSum};

use crate::error::ModelError;
use crate::shell::Shell;
use crate::wigner::Wigner3j;

/// A flavor matrix, row-major.
pub type FlavorMatrix = [Vec<Complex64>];

/// Checks that `mat` is `nf × nf`, or returns the identity when absent.
pub(crate) fn flavor_matrix(
    nf: usize,
    mat: Option<&FlavorMatrix>,
) -> Result<Vec<Vec<Complex64>>, ModelError> {
    let Some(mat) = mat else {
        return Ok((0..nf)
            .map(|i| {
                (0..nf)
                    .map(|j| Complex64::new(if i == j { 1.0 } else { 0.0 }, 0.0))
                    .collect()
            })
            .collect());
    };
    if mat.len() != nf {
        return Err(ModelError::MatrixSize {
            expected: nf,
            found: mat.len(),
        });
    }
    if let Some(row) = mat.iter().find(|row| row.len() != nf) {
        return Err(ModelError::MatrixSize {
            expected: nf,
            found: row.len(),
        });
    }
    Ok(mat.to_vec())
}

/// Conjugate transpose of a square flavor matrix.
fn adjoint(mat: &[Vec<Complex64>]) -> Vec<Vec<Complex64>> {
    (0..mat.len())
        .map(|i| mat.iter().map(|row| row[i].conj()).collect())
        .collect()
}

/// Generates the density-density interaction in the pseudopotential basis.
///
/// ```text
/// Σ U_{m1 m2 m3 m4} A_{f1 f4} B_{f2 f3} c†_{m1 f1} c†_{m2 f2} c_{m3 f3} c_{m4 f4}
/// U = Σ_l V_l (4s - 2l + 1) (s s 2s-l; m1 m2 -m1-m2) (s s 2s-l; m4 m3 -m3-m4)
/// ```
///
/// `pseudopotentials[l]` is `V_l`. `mat_a` defaults to the identity and
/// `mat_b` to the adjoint of `mat_a`, so passing `σz` alone gives `σz ⊗ σz`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell,
/// [`ModelError::TooManyPseudopotentials`] for more than `nm` channels and
/// [`ModelError::MatrixSize`] if a flavor matrix is not `nf × nf`.
pub fn density_interaction_terms(
    nm: usize,
    nf: usize,
    pseudopotentials: &[f64],
    mat_a: Option<&FlavorMatrix>,
    mat_b: Option<&FlavorMatrix>,
) -> Result<NormalTerms, ModelError> {
    let shell = Shell::new(nm, nf)?;
    if pseudopotentials.len() > nm {
        return Err(ModelError::TooManyPseudopotentials {
            count: pseudopotentials.len(),
            max: nm,
        });
    }
    let mat_a = flavor_matrix(nf, mat_a)?;
    let mat_b = match mat_b {
        Some(mat) => flavor_matrix(nf, Some(mat))?,
        None => adjoint(&mat_a),
    };
    let ts = shell.twice_s();

    // (s s 2s-l; m1 m2 -m1-m2) for every channel and pair of orbitals
    let w = Wigner3j::new(u32::try_from(2 * ts).unwrap_or(u32::MAX));
    let three_j: Vec<Vec<f64>> = (0..pseudopotentials.len())
        .map(|l| {
            #[allow(clippy::cast_possible_wrap)]
            let tj = 2 * ts - 2 * l as i64;
            (0..nm * nm)
                .map(|k| {
                    let (tm1, tm2) = (shell.twice_m(k / nm), shell.twice_m(k % nm));
                    w.value([ts, ts, tj], [tm1, tm2, -tm1 - tm2])
                })
                .collect()
        })
        .collect();
    let pair_amplitude = |m1: usize, m2: usize, m3: usize, m4: usize| -> f64 {
        pseudopotentials
            .iter()
            .enumerate()
            .map(|(l, v)| {
                #[allow(clippy::cast_precision_loss)]
                let degeneracy = (2 * ts - 2 * l as i64 + 1) as f64;
                v * degeneracy * three_j[l][m1 * nm + m2] * three_j[l][m4 * nm + m3]
            })
            .sum()
    };

    let mut sum = TermSum::new();
    for m1 in 0..nm {
        for m2 in 0..nm {
            for m3 in 0..nm {
                let Some(m4) = (m1 + m2).checked_sub(m3).filter(|&m4| m4 < nm) else {
                    continue;
                };
                let u = pair_amplitude(m1, m2, m3, m4);
                if u == 0.0 {
                    continue;
                }
                for (f1, f2, f3, f4) in flavor_quads(nf) {
                    let coeff = u * mat_a[f1][f4] * mat_b[f2][f3];
                    if coeff.norm() == 0.0 {
                        continue;
                    }
                    sum.push(
                        Term::two_body(
                            shell.orbital(m1, f1),
                            shell.orbital(m2, f2),
                            shell.orbital(m3, f3),
                            shell.orbital(m4, f4),
                        )
                        .scale(coeff),
                    );
                }
            }
        }
    }

    let terms = Simplifier::new().simplify(&sum)?;
    debug!(
        "density interaction: nm = {nm}, nf = {nf}, {} channels -> {} terms",
        pseudopotentials.len(),
        terms.len()
    );
    Ok(terms)
}

fn flavor_quads(nf: usize) -> impl Iterator<Item = (usize, usize, usize, usize)> {
    (0..nf.pow(4)).map(move |k| (k / nf.pow(3), (k / nf.pow(2)) % nf, (k / nf) % nf, k % nf))
}

/// Generates the flavor polarization `Σ_m Σ_{f f'} M_{f f'} c†_{m f} c_{m f'}`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell and
/// [`ModelError::MatrixSize`] if `mat` is not `nf × nf`.
pub fn polarization_terms(nm: usize, nf: usize, mat: &FlavorMatrix) -> Result<NormalTerms, ModelError> {
    let shell = Shell::new(nm, nf)?;
    let mat = flavor_matrix(nf, Some(mat))?;
    let sum: TermSum = (0..nm)
        .flat_map(|m| (0..nf * nf).map(move |k| (m, k / nf, k % nf)))
        .filter(|&(_, f, g)| mat[f][g].norm() != 0.0)
        .map(|(m, f, g)| Term::one_body(shell.orbital(m, f), shell.orbital(m, g)).scale(mat[f][g]))
        .collect();
    Ok(Simplifier::new().simplify(&sum)?)
}
