//! Configurations under conserved quantities.
//!
//! A conserved quantity assigns an integer charge to every orbital; a
//! configuration belongs to the sector when the summed charge of its occupied
//! orbitals hits the target (modulo `n` for a Z_n quantity). Enumeration is a
//! depth-first search over orbitals with range pruning on the non-modular
//! quantities.

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::BasisError;
use crate::fock::MAX_ORBITALS;

/// An additive quantum number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conserved {
    charges: Vec<i64>,
    target: i64,
    modulus: Option<u64>,
}

impl Conserved {
    /// Creates a quantity whose total charge must equal `target`.
    #[must_use]
    pub fn new(charges: Vec<i64>, target: i64) -> Self {
        Self {
            charges,
            target,
            modulus: None,
        }
    }

    /// Creates a Z_n quantity whose total charge must equal `target` modulo `modulus`.
    #[must_use]
    pub fn modular(charges: Vec<i64>, target: i64, modulus: u64) -> Self {
        Self {
            charges,
            target,
            modulus: Some(modulus),
        }
    }

    /// Per-orbital charges.
    #[must_use]
    pub fn charges(&self) -> &[i64] {
        &self.charges
    }

    /// Target value.
    #[must_use]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Modulus, if this is a Z_n quantity.
    #[must_use]
    pub fn modulus(&self) -> Option<u64> {
        self.modulus
    }

    /// Total charge of a configuration.
    #[must_use]
    pub fn charge_of(&self, config: u64) -> i64 {
        crate::fock::occupied_orbitals(config)
            .map(|o| self.charges.get(o).copied().unwrap_or(0))
            .sum()
    }

    /// Returns true if `total` meets the target.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn accepts(&self, total: i64) -> bool {
        match self.modulus {
            Some(m) => (total - self.target).rem_euclid(m as i64) == 0,
            None => total == self.target,
        }
    }
}

/// Suffix bounds of one non-modular quantity: reachable charge from orbital `o` on.
#[derive(Clone, Debug)]
struct Reach {
    min: Vec<i64>,
    max: Vec<i64>,
}

impl Reach {
    fn new(charges: &[i64]) -> Self {
        let n = charges.len();
        let mut min = vec![0; n + 1];
        let mut max = vec![0; n + 1];
        for o in (0..n).rev() {
            min[o] = min[o + 1] + charges[o].min(0);
            max[o] = max[o + 1] + charges[o].max(0);
        }
        Self { min, max }
    }
}

/// The set of configurations satisfying all conserved quantities.
#[derive(Clone, Debug)]
pub struct Confs {
    num_orbitals: usize,
    quantities: Vec<Conserved>,
    configs: Vec<u64>,
    index: FxHashMap<u64, usize>,
}

impl Confs {
    /// Enumerates every configuration over `num_orbitals` orbitals that
    /// satisfies all `quantities`.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::TooManyOrbitals`] beyond 64 orbitals,
    /// [`BasisError::LengthMismatch`] if a charge vector does not have one
    /// entry per orbital and [`BasisError::ZeroModulus`] for a zero modulus.
    pub fn new(num_orbitals: usize, quantities: Vec<Conserved>) -> Result<Self, BasisError> {
        if num_orbitals > MAX_ORBITALS {
            return Err(BasisError::TooManyOrbitals { num_orbitals });
        }
        for q in &quantities {
            if q.charges.len() != num_orbitals {
                return Err(BasisError::LengthMismatch {
                    expected: num_orbitals,
                    found: q.charges.len(),
                });
            }
            if q.modulus == Some(0) {
                return Err(BasisError::ZeroModulus);
            }
        }

        let mut search = Search::new(num_orbitals, &quantities);
        search.run(0, 0);
        let mut configs = search.found;
        configs.sort_unstable();

        let index = configs.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        debug!(
            "confs: {} orbitals, {} quantities -> {} configurations",
            num_orbitals,
            quantities.len(),
            configs.len()
        );

        Ok(Self {
            num_orbitals,
            quantities,
            configs,
            index,
        })
    }

    /// Number of configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns true if no configuration satisfies the quantities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Number of orbitals.
    #[must_use]
    pub fn num_orbitals(&self) -> usize {
        self.num_orbitals
    }

    /// The conserved quantities.
    #[must_use]
    pub fn quantities(&self) -> &[Conserved] {
        &self.quantities
    }

    /// All configurations in ascending order.
    #[must_use]
    pub fn configs(&self) -> &[u64] {
        &self.configs
    }

    /// The configuration at index `i`.
    #[must_use]
    pub fn config(&self, i: usize) -> Option<u64> {
        self.configs.get(i).copied()
    }

    /// Index of a configuration.
    #[must_use]
    pub fn index_of(&self, config: u64) -> Option<usize> {
        self.index.get(&config).copied()
    }

    /// Returns true if the configuration is in the set.
    #[must_use]
    pub fn contains(&self, config: u64) -> bool {
        self.index.contains_key(&config)
    }
}

/// Depth-first enumeration state.
struct Search<'a> {
    num_orbitals: usize,
    quantities: &'a [Conserved],
    reach: Vec<Option<Reach>>,
    totals: Vec<i64>,
    found: Vec<u64>,
}

impl<'a> Search<'a> {
    fn new(num_orbitals: usize, quantities: &'a [Conserved]) -> Self {
        let reach = quantities
            .iter()
            .map(|q| q.modulus.is_none().then(|| Reach::new(&q.charges)))
            .collect();
        Self {
            num_orbitals,
            quantities,
            reach,
            totals: vec![0; quantities.len()],
            found: Vec::new(),
        }
    }

    /// Returns false if some non-modular target is out of reach from orbital `o`.
    fn feasible(&self, o: usize) -> bool {
        self.quantities
            .iter()
            .zip(&self.reach)
            .zip(&self.totals)
            .all(|((q, reach), &total)| match reach {
                Some(r) => {
                    let need = q.target - total;
                    r.min[o] <= need && need <= r.max[o]
                }
                None => true,
            })
    }

    fn run(&mut self, o: usize, config: u64) {
        if !self.feasible(o) {
            return;
        }
        if o == self.num_orbitals {
            if self
                .quantities
                .iter()
                .zip(&self.totals)
                .all(|(q, &t)| q.accepts(t))
            {
                self.found.push(config);
            }
            return;
        }

        self.run(o + 1, config);

        for (k, q) in self.quantities.iter().enumerate() {
            self.totals[k] += q.charges[o];
        }
        self.run(o + 1, config | (1 << o));
        for (k, q) in self.quantities.iter().enumerate() {
            self.totals[k] -= q.charges[o];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binomial(n: u64, k: u64) -> u64 {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn test_particle_number() {
        let confs = Confs::new(6, vec![Conserved::new(vec![1; 6], 3)]).unwrap();
        assert_eq!(confs.len() as u64, binomial(6, 3));
        assert!(confs.configs().iter().all(|c| c.count_ones() == 3));
        assert!(confs.configs().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_no_quantities_is_full_space() {
        let confs = Confs::new(4, Vec::new()).unwrap();
        assert_eq!(confs.len(), 16);
        assert_eq!(confs.index_of(0b1011), Some(11));
    }

    #[test]
    fn test_lz_sector() {
        // Three orbitals with 2m = -2, 0, 2; two particles with total 2m = 0
        let confs = Confs::new(
            3,
            vec![Conserved::new(vec![1, 1, 1], 2), Conserved::new(vec![-2, 0, 2], 0)],
        )
        .unwrap();
        assert_eq!(confs.configs(), &[0b101]);
    }

    #[test]
    fn test_modular_quantity() {
        let confs = Confs::new(4, vec![Conserved::modular(vec![1, 1, 1, 1], 0, 2)]).unwrap();
        assert_eq!(confs.len(), 8);
        assert!(confs.configs().iter().all(|c| c.count_ones() % 2 == 0));
    }

    #[test]
    fn test_negative_target() {
        let confs = Confs::new(3, vec![Conserved::new(vec![-1, 0, 1], -1)]).unwrap();
        assert_eq!(confs.configs(), &[0b001, 0b011]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Confs::new(65, Vec::new()).unwrap_err(),
            BasisError::TooManyOrbitals { num_orbitals: 65 }
        );
        assert_eq!(
            Confs::new(3, vec![Conserved::new(vec![1, 1], 1)]).unwrap_err(),
            BasisError::LengthMismatch { expected: 3, found: 2 }
        );
        assert_eq!(
            Confs::new(2, vec![Conserved::modular(vec![1, 1], 1, 0)]).unwrap_err(),
            BasisError::ZeroModulus
        );
    }

    #[test]
    fn test_charge_of() {
        let q = Conserved::new(vec![-2, 0, 2], 0);
        assert_eq!(q.charge_of(0b101), 0);
        assert_eq!(q.charge_of(0b100), 2);
    }
}
