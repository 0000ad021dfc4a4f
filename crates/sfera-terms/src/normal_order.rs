//! Normal ordering of a single term.
//!
//! The canonical form puts every creation operator before every
//! annihilation operator, creations with strictly ascending orbitals and
//! annihilations with strictly descending orbitals. A raw term is rewritten
//! with the canonical anticommutation relations
//!
//! ```text
//! {c_i, c_j^†} = δ_ij,   {c_i, c_j} = {c_i^†, c_j^†} = 0
//! ```
//!
//! applied to the first offending adjacent pair, rescanning after every
//! rewrite. Pending strings live on an explicit work stack: the contraction
//! `c_o c_o^† = 1 - c_o^† c_o` pushes two descendants.

use log::trace;
use num_complex::Complex64;

use crate::op::{Op, OpKind};
use crate::term::{OpString, Term};

/// A single rewrite step at the first non-canonical position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rewrite {
    /// Delete an identity marker embedded in a longer string.
    Drop(usize),
    /// Swap the pair at `i, i + 1` and negate.
    Swap(usize),
    /// `c_o c_o^†` at `i, i + 1`: contracted plus swapped-and-negated.
    Contract(usize),
    /// Repeated operator of the same kind: the term is zero.
    Vanish,
}

/// Finds the first rewrite, or `None` if the string is canonical.
fn first_rewrite(ops: &[Op]) -> Option<Rewrite> {
    for i in 0..ops.len() {
        if ops[i].is_identity() {
            if ops.len() > 1 {
                return Some(Rewrite::Drop(i));
            }
            continue;
        }
        let Some(next) = ops.get(i + 1) else {
            break;
        };
        if next.is_identity() {
            continue;
        }

        let (a, b) = (ops[i], *next);
        match (a.kind, b.kind) {
            (OpKind::Annihilation, OpKind::Creation) => {
                if a.orbital == b.orbital {
                    return Some(Rewrite::Contract(i));
                }
                return Some(Rewrite::Swap(i));
            }
            (OpKind::Creation, OpKind::Creation) => {
                if a.orbital == b.orbital {
                    return Some(Rewrite::Vanish);
                }
                if a.orbital > b.orbital {
                    return Some(Rewrite::Swap(i));
                }
            }
            (OpKind::Annihilation, OpKind::Annihilation) => {
                if a.orbital == b.orbital {
                    return Some(Rewrite::Vanish);
                }
                if a.orbital < b.orbital {
                    return Some(Rewrite::Swap(i));
                }
            }
            _ => {}
        }
    }
    None
}

/// Rewrites a term into an equivalent list of normal-ordered terms.
///
/// The output is not merged: distinct branches may produce the same string.
/// A term whose string reduces to nothing becomes the identity term.
///
/// # Example
///
/// ```
/// use sfera_terms::{normal_order, Op, Term};
///
/// // c_0 c_0^† = 1 - c_0^† c_0
/// let t = Term::new(1.0, [Op::annihilation(0), Op::creation(0)]);
/// let out = normal_order(&t);
/// assert_eq!(out.len(), 2);
/// ```
#[must_use]
pub fn normal_order(term: &Term) -> Vec<Term> {
    let mut pending: Vec<(Complex64, OpString)> = vec![(term.coeff(), term.ops().into())];
    let mut result = Vec::new();
    let mut rewrites = 0usize;

    while let Some((coeff, mut ops)) = pending.pop() {
        match first_rewrite(&ops) {
            None => {
                if ops.is_empty() {
                    ops.push(Op::IDENTITY);
                }
                result.push(Term::from_parts(coeff, ops));
            }
            Some(Rewrite::Drop(i)) => {
                ops.remove(i);
                pending.push((coeff, ops));
            }
            Some(Rewrite::Swap(i)) => {
                ops.swap(i, i + 1);
                pending.push((-coeff, ops));
            }
            Some(Rewrite::Contract(i)) => {
                let mut contracted = OpString::with_capacity(ops.len() - 2);
                contracted.extend_from_slice(&ops[..i]);
                contracted.extend_from_slice(&ops[i + 2..]);
                ops.swap(i, i + 1);
                pending.push((-coeff, ops));
                pending.push((coeff, contracted));
            }
            Some(Rewrite::Vanish) => {}
        }
        rewrites += 1;
    }

    trace!(
        "normal_order: {} operators -> {} terms in {} rewrites",
        term.ops().len(),
        result.len(),
        rewrites
    );
    result
}
