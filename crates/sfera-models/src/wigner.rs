//! Wigner 3j symbols.
//!
//! All angular momenta are passed doubled, so `j = 1/2` is written `1`. The
//! symbol is evaluated with the Racah formula, with factorials kept in log
//! form so that large shells do not overflow.

/// Table of `ln n!`.
#[derive(Clone, Debug)]
struct LnFactorials(Vec<f64>);

impl LnFactorials {
    fn new(max: usize) -> Self {
        let mut table = Vec::with_capacity(max + 1);
        table.push(0.0);
        for n in 1..=max {
            #[allow(clippy::cast_precision_loss)]
            let x = n as f64;
            table.push(table[n - 1] + x.ln());
        }
        Self(table)
    }

    fn get(&self, n: i64) -> f64 {
        self.0[usize::try_from(n).unwrap_or_default()]
    }
}

/// 3j-symbol evaluator with a shared factorial table.
#[derive(Clone, Debug)]
pub struct Wigner3j {
    ln_fact: LnFactorials,
    max_twice_j: i64,
}

impl Wigner3j {
    /// Creates an evaluator for doubled angular momenta up to `max_twice_j`.
    #[must_use]
    pub fn new(max_twice_j: u32) -> Self {
        let max = i64::from(max_twice_j);
        // (j1 + j2 + j3 + 1)! is the largest factorial in the Racah formula
        let size = usize::try_from(3 * max / 2 + 2).unwrap_or_default();
        Self {
            ln_fact: LnFactorials::new(size),
            max_twice_j: max,
        }
    }

    /// Largest doubled angular momentum supported.
    #[must_use]
    pub fn max_twice_j(&self) -> i64 {
        self.max_twice_j
    }

    /// Evaluates `(j1 j2 j3; m1 m2 m3)` from doubled arguments.
    ///
    /// Returns zero when the selection rules forbid the symbol.
    ///
    /// # Panics
    ///
    /// Panics if some `tj` exceeds [`Wigner3j::max_twice_j`].
    #[must_use]
    pub fn value(&self, tj: [i64; 3], tm: [i64; 3]) -> f64 {
        assert!(
            tj.iter().all(|&j| j <= self.max_twice_j),
            "angular momentum beyond the factorial table"
        );
        if !selection_rules(tj, tm) {
            return 0.0;
        }
        let [tj1, tj2, tj3] = tj;
        let [tm1, tm2, tm3] = tm;
        let f = |n: i64| self.ln_fact.get(n);

        let ln_delta = f((tj1 + tj2 - tj3) / 2) + f((tj1 - tj2 + tj3) / 2) + f((-tj1 + tj2 + tj3) / 2)
            - f((tj1 + tj2 + tj3) / 2 + 1);
        let ln_norm = f((tj1 + tm1) / 2)
            + f((tj1 - tm1) / 2)
            + f((tj2 + tm2) / 2)
            + f((tj2 - tm2) / 2)
            + f((tj3 + tm3) / 2)
            + f((tj3 - tm3) / 2);
        let ln_prefactor = 0.5 * (ln_delta + ln_norm);

        let k_min = 0.max((tj2 - tj3 - tm1) / 2).max((tj1 - tj3 + tm2) / 2);
        let k_max = ((tj1 + tj2 - tj3) / 2)
            .min((tj1 - tm1) / 2)
            .min((tj2 + tm2) / 2);

        let sum: f64 = (k_min..=k_max)
            .map(|k| {
                let ln_den = f(k)
                    + f((tj1 + tj2 - tj3) / 2 - k)
                    + f((tj1 - tm1) / 2 - k)
                    + f((tj2 + tm2) / 2 - k)
                    + f((tj3 - tj2 + tm1) / 2 + k)
                    + f((tj3 - tj1 - tm2) / 2 + k);
                let term = (ln_prefactor - ln_den).exp();
                if k % 2 == 0 {
                    term
                } else {
                    -term
                }
            })
            .sum();

        if ((tj1 - tj2 - tm3) / 2) % 2 == 0 {
            sum
        } else {
            -sum
        }
    }
}

fn selection_rules(tj: [i64; 3], tm: [i64; 3]) -> bool {
    let [tj1, tj2, tj3] = tj;
    tm.iter().sum::<i64>() == 0
        && tj.iter().zip(&tm).all(|(&j, &m)| j >= 0 && m.abs() <= j && (j + m) % 2 == 0)
        && tj3 <= tj1 + tj2
        && tj3 >= (tj1 - tj2).abs()
        && (tj1 + tj2 + tj3) % 2 == 0
}

/// Evaluates the Wigner 3j symbol `(j1 j2 j3; m1 m2 m3)` from doubled
/// arguments.
///
/// For repeated evaluation share a [`Wigner3j`] instead.
///
/// ```
/// use sfera_models::wigner_3j;
///
/// // (1/2 1/2 0; 1/2 -1/2 0) = 1/√2
/// let w = wigner_3j(1, 1, 0, 1, -1, 0);
/// assert!((w - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-14);
/// ```
#[must_use]
pub fn wigner_3j(tj1: i64, tj2: i64, tj3: i64, tm1: i64, tm2: i64, tm3: i64) -> f64 {
    let max = [tj1, tj2, tj3].into_iter().max().unwrap_or(0).max(0);
    Wigner3j::new(u32::try_from(max).unwrap_or(u32::MAX)).value([tj1, tj2, tj3], [tm1, tm2, tm3])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-13
    }

    #[test]
    fn test_known_values() {
        let r2 = std::f64::consts::FRAC_1_SQRT_2;
        assert!(close(wigner_3j(1, 1, 0, 1, -1, 0), r2));
        assert!(close(wigner_3j(1, 1, 0, -1, 1, 0), -r2));
        assert!(close(wigner_3j(2, 2, 0, 0, 0, 0), -1.0 / 3f64.sqrt()));
        assert!(close(wigner_3j(2, 2, 2, 2, -2, 0), 1.0 / 6f64.sqrt()));
        assert!(close(wigner_3j(1, 1, 2, 1, -1, 0), 1.0 / 6f64.sqrt()));
    }

    #[test]
    fn test_selection_rules() {
        assert_eq!(wigner_3j(2, 2, 2, 2, 0, 0), 0.0);
        assert_eq!(wigner_3j(2, 2, 6, 0, 0, 0), 0.0);
        assert_eq!(wigner_3j(1, 1, 1, 1, -1, 0), 0.0);
        assert_eq!(wigner_3j(2, 2, 2, 4, -4, 0), 0.0);
        // (1 1 1; 0 0 0) vanishes by parity
        assert!(close(wigner_3j(2, 2, 2, 0, 0, 0), 0.0));
    }

    #[test]
    fn test_orthogonality() {
        // Σ_{m1 m2} (2 j3 + 1) (j1 j2 j3; m1 m2 m3)(j1 j2 j3'; m1 m2 m3) = δ_{j3 j3'}
        let w = Wigner3j::new(12);
        let (tj1, tj2) = (5, 3);
        for tj3 in (2..=8).step_by(2) {
            for tj3p in (2..=8).step_by(2) {
                let tm3 = 0;
                let mut sum = 0.0;
                for tm1 in (-tj1..=tj1).step_by(2) {
                    let tm2 = -tm1 - tm3;
                    sum += w.value([tj1, tj2, tj3], [tm1, tm2, tm3])
                        * w.value([tj1, tj2, tj3p], [tm1, tm2, tm3]);
                }
                #[allow(clippy::cast_precision_loss)]
                let expected = if tj3 == tj3p { 1.0 / (tj3 + 1) as f64 } else { 0.0 };
                assert!(close(sum, expected), "j3 = {tj3}/2, j3' = {tj3p}/2: {sum}");
            }
        }
    }

    #[test]
    fn test_large_shell_is_finite() {
        let w = Wigner3j::new(400);
        let v = w.value([199, 199, 398], [199, -199, 0]);
        assert!(v.is_finite() && v.abs() <= 1.0);
    }
}
