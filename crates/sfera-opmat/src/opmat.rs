//! Operator matrices in Compressed Sparse Row (CSR) format.
//!
//! An [`OpMat`] holds the matrix of a simplified operator between two bases:
//! rows are indexed by the bra basis, columns by the ket basis. Assembly walks
//! the ket states in parallel, applies every term to every member
//! configuration and collects `(row, col, value)` triplets, which are then
//! compressed with duplicates summed.

use log::{debug, warn};
use num_complex::Complex64;
use num_traits::Zero;
use rayon::prelude::*;

use sfera_basis::{apply_string, Basis};
use sfera_terms::{check_threshold, NormalTerms};

use crate::config::AssemblyConfig;
use crate::error::OpMatError;

type Triplet = (usize, usize, Complex64);

/// Sparse operator matrix.
///
/// Row `i` holds entries `row_ptrs[i]..row_ptrs[i + 1]` of `values` and
/// `col_indices`, sorted by column.
#[derive(Clone, Debug, PartialEq)]
pub struct OpMat {
    values: Vec<Complex64>,
    col_indices: Vec<usize>,
    row_ptrs: Vec<usize>,
    num_cols: usize,
}

impl OpMat {
    /// Creates an empty `num_rows × num_cols` matrix.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            values: Vec::new(),
            col_indices: Vec::new(),
            row_ptrs: vec![0; num_rows + 1],
            num_cols,
        }
    }

    /// Assembles the matrix of `terms` from `ket` states to `bra` states.
    ///
    /// `M[i][j] = Σ_{c ∈ j} Σ_t a_c · coeff_t · sign · conj(b_{c'})`, where
    /// `c'` is the image of `c` under term `t` and `b_{c'}` its amplitude in
    /// bra state `i`. Images outside the bra configurations contribute
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`OpMatError::OrbitalMismatch`] if the bases disagree on the
    /// orbital count, [`OpMatError::Term`] if a term addresses an orbital
    /// outside the basis or the threshold is negative or not finite, [`OpMatError::ComplexEntry`] for an imaginary entry
    /// under [`AssemblyConfig::real_only`], and [`OpMatError::ThreadPool`] if
    /// a dedicated pool was requested and could not be built.
    pub fn assemble(
        bra: &Basis,
        ket: &Basis,
        terms: &NormalTerms,
        config: &AssemblyConfig,
    ) -> Result<Self, OpMatError> {
        if bra.num_orbitals() != ket.num_orbitals() {
            return Err(OpMatError::OrbitalMismatch {
                bra: bra.num_orbitals(),
                ket: ket.num_orbitals(),
            });
        }
        check_threshold(config.threshold)?;
        for term in terms {
            term.validate(ket.num_orbitals())?;
        }

        let triplets = match config.num_threads {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| OpMatError::ThreadPool(e.to_string()))?
                .install(|| collect_triplets(bra, ket, terms)),
            None => collect_triplets(bra, ket, terms),
        };
        let num_triplets = triplets.len();

        let mut mat = Self::from_triplets(bra.len(), ket.len(), triplets, config.threshold);
        if config.real_only {
            mat.make_real(config.threshold)?;
        }

        debug!(
            "assemble: {} terms, {}x{} matrix, {} triplets -> {} entries",
            terms.len(),
            mat.num_rows(),
            mat.num_cols(),
            num_triplets,
            mat.nnz()
        );
        Ok(mat)
    }

    /// Creates a matrix from triplets `(row, col, value)`.
    ///
    /// Duplicate entries are summed; sums with norm at or below `threshold`
    /// are not stored.
    ///
    /// # Panics
    ///
    /// Panics if a row or column index is out of range.
    #[must_use]
    pub fn from_triplets(
        num_rows: usize,
        num_cols: usize,
        mut triplets: Vec<Triplet>,
        threshold: f64,
    ) -> Self {
        triplets.sort_unstable_by_key(|&(r, c, _)| (r, c));

        let mut merged: Vec<Triplet> = Vec::with_capacity(triplets.len());
        for (row, col, val) in triplets {
            match merged.last_mut() {
                Some(last) if last.0 == row && last.1 == col => last.2 += val,
                _ => merged.push((row, col, val)),
            }
        }

        let mut values = Vec::with_capacity(merged.len());
        let mut col_indices = Vec::with_capacity(merged.len());
        let mut row_ptrs = Vec::with_capacity(num_rows + 1);
        row_ptrs.push(0);

        for (row, col, val) in merged {
            assert!(row < num_rows, "row {row} out of range");
            assert!(col < num_cols, "column {col} out of range");
            if val.norm() <= threshold {
                continue;
            }
            // Fill in empty rows
            while row_ptrs.len() <= row {
                row_ptrs.push(values.len());
            }
            values.push(val);
            col_indices.push(col);
        }
        while row_ptrs.len() <= num_rows {
            row_ptrs.push(values.len());
        }

        Self {
            values,
            col_indices,
            row_ptrs,
            num_cols,
        }
    }

    /// Number of rows (bra dimension).
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.row_ptrs.len() - 1
    }

    /// Number of columns (ket dimension).
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the stored entries of a row as `(col, value)`.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, Complex64)> + '_ {
        let (start, end) = (self.row_ptrs[row], self.row_ptrs[row + 1]);
        self.col_indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Iterates over all stored entries as `(row, col, value)`.
    pub fn entries(&self) -> impl Iterator<Item = Triplet> + '_ {
        (0..self.num_rows()).flat_map(move |r| self.row_iter(r).map(move |(c, v)| (r, c, v)))
    }

    /// Entry at `(row, col)`; zero if not stored or out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        if row >= self.num_rows() {
            return Complex64::zero();
        }
        let (start, end) = (self.row_ptrs[row], self.row_ptrs[row + 1]);
        self.col_indices[start..end]
            .binary_search(&col)
            .map_or_else(|_| Complex64::zero(), |k| self.values[start + k])
    }

    /// Matrix-vector product `M v`.
    ///
    /// # Errors
    ///
    /// Returns [`OpMatError::DimensionMismatch`] if `v` does not have one entry
    /// per column.
    pub fn mul_vec(&self, v: &[Complex64]) -> Result<Vec<Complex64>, OpMatError> {
        if v.len() != self.num_cols {
            return Err(OpMatError::DimensionMismatch {
                expected: self.num_cols,
                found: v.len(),
            });
        }
        Ok((0..self.num_rows())
            .map(|r| self.row_iter(r).map(|(c, val)| val * v[c]).sum())
            .collect())
    }

    /// Matrix element `<bra|M|ket>`.
    ///
    /// # Errors
    ///
    /// Returns [`OpMatError::DimensionMismatch`] if a vector does not match
    /// the matrix.
    pub fn expectation(&self, bra: &[Complex64], ket: &[Complex64]) -> Result<Complex64, OpMatError> {
        if bra.len() != self.num_rows() {
            return Err(OpMatError::DimensionMismatch {
                expected: self.num_rows(),
                found: bra.len(),
            });
        }
        let mv = self.mul_vec(ket)?;
        Ok(bra.iter().zip(&mv).map(|(b, m)| b.conj() * m).sum())
    }

    /// Dense row-major copy.
    #[must_use]
    pub fn to_dense(&self) -> Vec<Vec<Complex64>> {
        let mut dense = vec![vec![Complex64::zero(); self.num_cols]; self.num_rows()];
        for (r, c, v) in self.entries() {
            dense[r][c] = v;
        }
        dense
    }

    /// Returns true if the matrix is square and equals its conjugate
    /// transpose within `tol`.
    #[must_use]
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.num_rows() == self.num_cols
            && self
                .entries()
                .all(|(r, c, v)| (v - self.get(c, r).conj()).norm() <= tol)
    }

    /// Drops imaginary parts at or below `threshold`.
    fn make_real(&mut self, threshold: f64) -> Result<(), OpMatError> {
        if let Some((row, col, value)) = self.entries().find(|(_, _, v)| v.im.abs() > threshold) {
            return Err(OpMatError::ComplexEntry { row, col, value });
        }
        let mut noisy = 0usize;
        for v in &mut self.values {
            if v.im != 0.0 {
                noisy += 1;
                v.im = 0.0;
            }
        }
        if noisy > 0 {
            warn!("real-only assembly dropped imaginary noise from {noisy} entries");
        }
        Ok(())
    }
}

/// Triplets of all ket columns, computed in parallel.
fn collect_triplets(bra: &Basis, ket: &Basis, terms: &NormalTerms) -> Vec<Triplet> {
    (0..ket.len())
        .into_par_iter()
        .flat_map_iter(|col| column_triplets(bra, ket, terms, col))
        .collect()
}

fn column_triplets(bra: &Basis, ket: &Basis, terms: &NormalTerms, col: usize) -> Vec<Triplet> {
    let mut out = Vec::new();
    for &(idx, amp) in ket.state(col) {
        let Some(config) = ket.confs().config(idx) else {
            continue;
        };
        for term in terms {
            let Some((image, sign)) = apply_string(term.ops(), config) else {
                continue;
            };
            if let Some((row, bra_amp)) = bra.lookup(image) {
                out.push((row, col, amp * term.coeff() * sign * bra_amp.conj()));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfera_basis::{Confs, Conserved};
    use sfera_terms::{simplify, Term, TermError, TermSum};

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn full_basis(n: usize) -> Basis {
        Basis::trivial(Confs::new(n, Vec::new()).unwrap())
    }

    #[test]
    fn test_from_triplets_sums_duplicates() {
        let m = OpMat::from_triplets(
            3,
            2,
            vec![(2, 1, c(1.0, 0.0)), (0, 0, c(2.0, 0.0)), (2, 1, c(0.5, 1.0)), (1, 1, c(1e-20, 0.0))],
            1e-13,
        );
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.get(0, 0), c(2.0, 0.0));
        assert_eq!(m.get(2, 1), c(1.5, 1.0));
        assert_eq!(m.get(1, 1), c(0.0, 0.0));
        assert_eq!(m.row_iter(1).count(), 0);
    }

    #[test]
    fn test_number_operator() {
        let basis = full_basis(2);
        let n0 = simplify(&TermSum::from(Term::density(0))).unwrap();
        let m = OpMat::assemble(&basis, &basis, &n0, &AssemblyConfig::default()).unwrap();
        let dense = m.to_dense();
        for (i, row) in dense.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let expected = if i == j && i & 1 == 1 { 1.0 } else { 0.0 };
                assert_eq!(*v, c(expected, 0.0));
            }
        }
    }

    #[test]
    fn test_hopping_sign() {
        // c†_2 c_0 on c†_0 c†_1 |0> = -c†_1 c†_2 |0>
        let basis = full_basis(3);
        let hop = simplify(&TermSum::from(Term::one_body(2, 0))).unwrap();
        let m = OpMat::assemble(&basis, &basis, &hop, &AssemblyConfig::default()).unwrap();
        assert_eq!(m.get(0b110, 0b011), c(-1.0, 0.0));
        assert_eq!(m.get(0b100, 0b001), c(1.0, 0.0));
        assert_eq!(m.nnz(), 2);
    }

    #[test]
    fn test_hermitian_hopping() {
        let basis = full_basis(3);
        let a = TermSum::from(Term::one_body(0, 2)).scale(c(0.0, 1.0));
        let h = simplify(&(a.conjugate() + a)).unwrap();
        let m = OpMat::assemble(&basis, &basis, &h, &AssemblyConfig::default()).unwrap();
        assert!(m.is_hermitian(1e-14));
        let one_way = simplify(&TermSum::from(Term::one_body(0, 2))).unwrap();
        let m = OpMat::assemble(&basis, &basis, &one_way, &AssemblyConfig::default()).unwrap();
        assert!(!m.is_hermitian(1e-14));
    }

    #[test]
    fn test_mul_vec_and_expectation() {
        let basis = full_basis(1);
        let x = simplify(&(TermSum::from(Term::creation(0)) + Term::annihilation(0))).unwrap();
        let m = OpMat::assemble(&basis, &basis, &x, &AssemblyConfig::default()).unwrap();
        let v = vec![c(1.0, 0.0), c(0.0, 0.0)];
        assert_eq!(m.mul_vec(&v).unwrap(), vec![c(0.0, 0.0), c(1.0, 0.0)]);
        let plus = vec![c(1.0, 0.0), c(1.0, 0.0)];
        assert_eq!(m.expectation(&plus, &plus).unwrap(), c(2.0, 0.0));
        assert!(matches!(
            m.mul_vec(&[]),
            Err(OpMatError::DimensionMismatch { expected: 2, found: 0 })
        ));
    }

    #[test]
    fn test_images_outside_bra_are_ignored() {
        let one = Basis::trivial(Confs::new(2, vec![Conserved::new(vec![1, 1], 1)]).unwrap());
        let two = Basis::trivial(Confs::new(2, vec![Conserved::new(vec![1, 1], 2)]).unwrap());
        let create = simplify(&TermSum::from(Term::creation(1))).unwrap();
        let m = OpMat::assemble(&two, &one, &create, &AssemblyConfig::default()).unwrap();
        assert_eq!((m.num_rows(), m.num_cols()), (1, 2));
        // c†_1 c†_0 |0> = -c†_0 c†_1 |0>
        assert_eq!(m.get(0, 0), c(-1.0, 0.0));
        assert_eq!(m.get(0, 1), c(0.0, 0.0));

        let same = OpMat::assemble(&one, &one, &create, &AssemblyConfig::default()).unwrap();
        assert_eq!(same.nnz(), 0);
    }

    #[test]
    fn test_errors() {
        let basis = full_basis(2);
        let far = simplify(&TermSum::from(Term::density(5))).unwrap();
        assert!(matches!(
            OpMat::assemble(&basis, &basis, &far, &AssemblyConfig::default()),
            Err(OpMatError::Term(TermError::OrbitalOutOfRange { orbital: 5, .. }))
        ));

        let imag = simplify(&TermSum::from(Term::density(0)).scale(c(0.0, 1.0))).unwrap();
        let real_only = AssemblyConfig::default().with_real_only(true);
        let noisy = simplify(&TermSum::from(Term::density(0)).scale(c(1.0, 1e-14))).unwrap();
        let m = OpMat::assemble(&basis, &basis, &noisy, &real_only).unwrap();
        assert_eq!(m.get(1, 1), c(1.0, 0.0));
        assert!(matches!(
            OpMat::assemble(&basis, &basis, &imag, &real_only),
            Err(OpMatError::ComplexEntry { .. })
        ));

        let other = full_basis(3);
        assert!(matches!(
            OpMat::assemble(&basis, &other, &imag, &AssemblyConfig::default()),
            Err(OpMatError::OrbitalMismatch { bra: 2, ket: 3 })
        ));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let basis = full_basis(2);
        let n0 = simplify(&TermSum::from(Term::density(0))).unwrap();
        for threshold in [f64::NAN, -1.0] {
            let config = AssemblyConfig::default().with_threshold(threshold);
            assert!(matches!(
                OpMat::assemble(&basis, &basis, &n0, &config),
                Err(OpMatError::Term(TermError::InvalidThreshold { .. }))
            ));
        }
    }

    #[test]
    #[should_panic(expected = "column 2 out of range")]
    fn test_from_triplets_checks_columns() {
        let _ = OpMat::from_triplets(2, 2, vec![(0, 2, c(1.0, 0.0))], 0.0);
    }

    #[test]
    fn test_dedicated_pool_matches_global() {
        let basis = full_basis(4);
        let h = simplify(&(TermSum::hopping(0, 3) + TermSum::hopping(1, 2) + Term::two_body(0, 1, 1, 0)))
            .unwrap();
        let global = OpMat::assemble(&basis, &basis, &h, &AssemblyConfig::default()).unwrap();
        let pooled =
            OpMat::assemble(&basis, &basis, &h, &AssemblyConfig::default().with_num_threads(2)).unwrap();
        assert_eq!(global, pooled);
    }
}
