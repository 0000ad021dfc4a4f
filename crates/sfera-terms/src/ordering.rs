//! Canonical total order over operator strings.
//!
//! Strings compare position by position on `(orbital, kind)`, orbital first;
//! a proper prefix precedes the longer string. The order is strict and total,
//! so sorting places equal strings next to each other.

use std::cmp::Ordering;

use crate::op::Op;
use crate::term::Term;

/// Compares two single operators by orbital, then kind.
#[must_use]
pub fn cmp_op(a: &Op, b: &Op) -> Ordering {
    a.orbital
        .cmp(&b.orbital)
        .then_with(|| a.kind.rank().cmp(&b.kind.rank()))
}

/// Compares two operator strings lexicographically.
#[must_use]
pub fn cmp_lex(a: &[Op], b: &[Op]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match cmp_op(x, y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}

/// Compares two terms by their strings only.
#[must_use]
pub fn cmp_terms(a: &Term, b: &Term) -> Ordering {
    cmp_lex(a.ops(), b.ops())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbital_primary() {
        let a = [Op::annihilation(0), Op::creation(5)];
        let b = [Op::creation(1), Op::annihilation(0)];
        assert_eq!(cmp_lex(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_kind_tiebreak() {
        let a = [Op::creation(2)];
        let b = [Op::annihilation(2)];
        assert_eq!(cmp_lex(&a, &b), Ordering::Greater);
        assert_eq!(cmp_lex(&[Op::IDENTITY], &[Op::annihilation(0)]), Ordering::Less);
    }

    #[test]
    fn test_prefix_first() {
        let a = [Op::creation(0), Op::annihilation(0)];
        let b = [Op::creation(0), Op::annihilation(0), Op::creation(1), Op::annihilation(1)];
        assert_eq!(cmp_lex(&a, &b), Ordering::Less);
        assert_eq!(cmp_lex(&b, &a), Ordering::Greater);
        assert_eq!(cmp_lex(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_large_orbitals() {
        let a = [Op::creation(usize::MAX - 1)];
        let b = [Op::creation(usize::MAX)];
        assert_eq!(cmp_lex(&a, &b), Ordering::Less);
    }
}
