//! Quadratic Casimir of the Sp(N) flavor symmetry.

use sfera_terms::{NormalTerms, Op, Simplifier, Term, TermSum};

use crate::error::ModelError;
use crate::shell::Shell;

/// Symplectic form `Ω = [[0, 1], [-1, 0]] ⊗ 1_{nf/2}` as `(partner, sign)`.
fn omega(nf: usize, i: usize) -> (usize, f64) {
    let half = nf / 2;
    if i < half {
        (i + half, 1.0)
    } else {
        (i - half, -1.0)
    }
}

/// Generates the quadratic Casimir of Sp(nf), for even `nf`:
///
/// ```text
/// C₂ = ¼ Σ_{m m'} [ Σ_{ij} c†_{mi} c_{mj} c†_{m'j} c_{m'i}
///                 - Σ_{ijkl} Ω_{ik} Ω_{jl} c†_{mi} c_{mj} c†_{m'k} c_{m'l} ]
/// ```
///
/// For `nf = 2` this is the spin Casimir `S(S + 1)`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyShell`] for an empty shell and
/// [`ModelError::OddFlavors`] for odd `nf`.
pub fn spn_c2_terms(nm: usize, nf: usize) -> Result<NormalTerms, ModelError> {
    let shell = Shell::new(nm, nf)?;
    if nf % 2 != 0 {
        return Err(ModelError::OddFlavors { nf });
    }

    let string = |m: usize, i: usize, j: usize, mp: usize, k: usize, l: usize| {
        [
            Op::creation(shell.orbital(m, i)),
            Op::annihilation(shell.orbital(m, j)),
            Op::creation(shell.orbital(mp, k)),
            Op::annihilation(shell.orbital(mp, l)),
        ]
    };

    let mut sum = TermSum::new();
    for m in 0..nm {
        for mp in 0..nm {
            for i in 0..nf {
                for j in 0..nf {
                    sum.push(Term::new(0.25, string(m, i, j, mp, j, i)));
                    let (k, sk) = omega(nf, i);
                    let (l, sl) = omega(nf, j);
                    sum.push(Term::new(-0.25 * sk * sl, string(m, i, j, mp, k, l)));
                }
            }
        }
    }
    Ok(Simplifier::new().simplify(&sum)?)
}
