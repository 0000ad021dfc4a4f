//! Property-based tests for configuration enumeration and symmetry sectors.

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use proptest::prelude::*;

    use crate::{Basis, Confs, Conserved, Sector, Symmetry};

    const MAX_ORBITALS: usize = 8;

    fn charges(n: usize) -> impl Strategy<Value = Vec<i64>> {
        proptest::collection::vec(-2i64..=2, n)
    }

    fn permutation(n: usize) -> impl Strategy<Value = Vec<usize>> {
        Just((0..n).collect::<Vec<_>>()).prop_shuffle()
    }

    fn gcd(a: u32, b: u32) -> u32 {
        if b == 0 { a } else { gcd(b, a % b) }
    }

    /// Order of a permutation: lcm of its cycle lengths.
    fn order(perm: &[usize]) -> u32 {
        let mut seen = vec![false; perm.len()];
        let mut lcm = 1;
        for start in 0..perm.len() {
            let mut len = 0;
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

    proptest! {
        #[test]
        fn confs_match_brute_force(
            (n, q, target) in (1..=MAX_ORBITALS).prop_flat_map(|n| (Just(n), charges(n), -3i64..=3))
        ) {
            let quantity = Conserved::new(q, target);
            let expected: Vec<u64> = (0..1u64 << n)
                .filter(|&c| quantity.charge_of(c) == target)
                .collect();
            let confs = Confs::new(n, vec![quantity]).unwrap();
            prop_assert_eq!(confs.configs(), expected.as_slice());
        }

        #[test]
        fn modular_confs_match_brute_force(
            (n, q, target, m) in (1..=MAX_ORBITALS)
                .prop_flat_map(|n| (Just(n), charges(n), -3i64..=3, 1u64..=4))
        ) {
            let quantity = Conserved::modular(q, target, m);
            let expected: Vec<u64> = (0..1u64 << n)
                .filter(|&c| quantity.accepts(quantity.charge_of(c)))
                .collect();
            let confs = Confs::new(n, vec![quantity]).unwrap();
            prop_assert_eq!(confs.configs(), expected.as_slice());
        }

        #[test]
        fn sectors_of_a_permutation_are_complete(
            (n, perm, ne) in (1..=6usize).prop_flat_map(|n| (Just(n), permutation(n), 0..=n as i64))
        ) {
            let confs = Confs::new(n, vec![Conserved::new(vec![1; n], ne)]).unwrap();
            let cycle = order(&perm);
            let g = Symmetry::permutation(perm, cycle).unwrap();
            let total: usize = (0..cycle)
                .map(|k| {
                    let chi = Complex64::from_polar(1.0, 2.0 * std::f64::consts::PI * f64::from(k) / f64::from(cycle));
                    let sector = Sector::new(g.clone(), chi).unwrap();
                    Basis::new(confs.clone(), &[sector]).unwrap().len()
                })
                .sum();
            prop_assert_eq!(total, confs.len());
        }
    }
}
