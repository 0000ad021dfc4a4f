//! Property-based tests for the term algebra and normal ordering.

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use proptest::prelude::*;

    use crate::op::{Op, OpKind};
    use crate::simplify::simplify;
    use crate::sum::TermSum;
    use crate::term::Term;

    const NUM_ORBITALS: usize = 4;
    const DIM: usize = 1 << NUM_ORBITALS;

    // Strategy for single operators, identity markers included
    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            8 => (0..NUM_ORBITALS).prop_map(Op::creation),
            8 => (0..NUM_ORBITALS).prop_map(Op::annihilation),
            1 => Just(Op::IDENTITY),
        ]
    }

    // Small integer coefficients keep all arithmetic exact
    fn coeff() -> impl Strategy<Value = Complex64> {
        (-3i32..=3, -2i32..=2).prop_map(|(re, im)| Complex64::new(f64::from(re), f64::from(im)))
    }

    fn term() -> impl Strategy<Value = Term> {
        (coeff(), proptest::collection::vec(op(), 0..=6)).prop_map(|(c, ops)| Term::new(c, ops))
    }

    fn term_sum() -> impl Strategy<Value = TermSum> {
        proptest::collection::vec(term(), 0..=4).prop_map(TermSum::from_terms)
    }

    /// Applies a string right to left to a Fock state `c†_{o1} c†_{o2} ... |0>`
    /// with ascending orbitals.
    fn apply(ops: &[Op], mut state: usize) -> Option<(usize, f64)> {
        let mut sign = 1.0;
        for op in ops.iter().rev() {
            let bit = 1 << op.orbital;
            let below = (state & (bit - 1)).count_ones();
            match op.kind {
                OpKind::Identity => continue,
                OpKind::Creation if state & bit == 0 => state |= bit,
                OpKind::Annihilation if state & bit != 0 => state &= !bit,
                _ => return None,
            }
            if below % 2 == 1 {
                sign = -sign;
            }
        }
        Some((state, sign))
    }

    /// Dense Fock-space matrix of a sum, row-major.
    fn matrix<'a>(terms: impl IntoIterator<Item = &'a Term>) -> Vec<Complex64> {
        let mut m = vec![Complex64::new(0.0, 0.0); DIM * DIM];
        for t in terms {
            for col in 0..DIM {
                if let Some((row, sign)) = apply(t.ops(), col) {
                    m[row * DIM + col] += t.coeff() * sign;
                }
            }
        }
        m
    }

    fn matmul(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
        let mut m = vec![Complex64::new(0.0, 0.0); DIM * DIM];
        for i in 0..DIM {
            for k in 0..DIM {
                for j in 0..DIM {
                    m[i * DIM + j] += a[i * DIM + k] * b[k * DIM + j];
                }
            }
        }
        m
    }

    fn dagger(a: &[Complex64]) -> Vec<Complex64> {
        let mut m = vec![Complex64::new(0.0, 0.0); DIM * DIM];
        for i in 0..DIM {
            for j in 0..DIM {
                m[j * DIM + i] = a[i * DIM + j].conj();
            }
        }
        m
    }

    proptest! {
        // Algebraic identities

        #[test]
        fn conjugate_is_involution(t in term()) {
            prop_assert_eq!(t.conjugate().conjugate(), t);
        }

        #[test]
        fn union_sizes_add(a in term_sum(), b in term_sum()) {
            prop_assert_eq!(a.union(&b).len(), a.len() + b.len());
        }

        #[test]
        fn multiply_sizes_multiply(a in term_sum(), b in term_sum()) {
            prop_assert_eq!(a.multiply(&b).len(), a.len() * b.len());
        }

        // Normal ordering

        #[test]
        fn normal_order_preserves_operator(t in term()) {
            let reduced = crate::normal_order::normal_order(&t);
            prop_assert!(reduced.iter().all(Term::is_normal_ordered));
            prop_assert_eq!(matrix(&reduced), matrix([&t]));
        }

        #[test]
        fn simplify_preserves_operator(a in term_sum()) {
            let s = simplify(&a).unwrap();
            prop_assert_eq!(matrix(&s), matrix(&a));
        }

        #[test]
        fn simplify_is_canonical(a in term_sum()) {
            let s = simplify(&a).unwrap();
            prop_assert!(s.iter().all(Term::is_normal_ordered));
            for w in s.terms().windows(2) {
                prop_assert_eq!(
                    crate::ordering::cmp_terms(&w[0], &w[1]),
                    std::cmp::Ordering::Less
                );
            }
            prop_assert!(s.iter().all(|t| t.coeff().norm() > crate::DEFAULT_THRESHOLD));
        }

        #[test]
        fn simplify_is_idempotent(a in term_sum()) {
            let once = simplify(&a).unwrap();
            let twice = simplify(&once.to_sum()).unwrap();
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn simplify_is_linear(a in term_sum(), b in term_sum()) {
            let direct = simplify(&a.union(&b)).unwrap();
            let split = simplify(&(simplify(&a).unwrap().into_sum() + simplify(&b).unwrap().into_sum())).unwrap();
            prop_assert_eq!(direct, split);
        }

        #[test]
        fn sum_minus_itself_is_zero(a in term_sum()) {
            prop_assert!(simplify(&a.subtract(&a)).unwrap().is_empty());
        }

        // Operator semantics

        #[test]
        fn product_is_matrix_product(a in term_sum(), b in term_sum()) {
            let s = simplify(&a.multiply(&b)).unwrap();
            prop_assert_eq!(matrix(&s), matmul(&matrix(&a), &matrix(&b)));
        }

        #[test]
        fn conjugate_is_adjoint(a in term_sum()) {
            let s = simplify(&a.conjugate()).unwrap();
            prop_assert_eq!(matrix(&s), dagger(&matrix(&a)));
        }
    }
}
