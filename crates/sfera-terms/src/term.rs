//! Operator terms: a complex coefficient times an operator string.

use std::fmt;

use num_complex::Complex64;
use smallvec::SmallVec;

use crate::error::TermError;
use crate::op::{Op, OpKind};

/// An ordered operator string.
///
/// Two-body interactions have four operators, so that many are stored inline.
pub type OpString = SmallVec<[Op; 4]>;

/// A single term `coeff * op_1 op_2 ... op_l`.
#[derive(Clone, PartialEq, Debug)]
pub struct Term {
    coeff: Complex64,
    ops: OpString,
}

impl Term {
    /// Creates a term from a coefficient and an operator string.
    ///
    /// The coefficient is not checked; see [`Term::try_new`].
    #[must_use]
    pub fn new(coeff: impl Into<Complex64>, ops: impl IntoIterator<Item = Op>) -> Self {
        Self {
            coeff: coeff.into(),
            ops: ops.into_iter().collect(),
        }
    }

    /// Creates a term, rejecting non-finite coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::NumericDegenerate`] if the coefficient is NaN or infinite.
    pub fn try_new(coeff: impl Into<Complex64>, ops: impl IntoIterator<Item = Op>) -> Result<Self, TermError> {
        let term = Self::new(coeff, ops);
        term.check_finite()?;
        Ok(term)
    }

    /// Creates the scalar term `coeff * 1`.
    #[must_use]
    pub fn identity(coeff: impl Into<Complex64>) -> Self {
        Self::new(coeff, [Op::IDENTITY])
    }

    /// Creates the single-operator term `c_o^†`.
    #[must_use]
    pub fn creation(orbital: usize) -> Self {
        Self::new(1.0, [Op::creation(orbital)])
    }

    /// Creates the single-operator term `c_o`.
    #[must_use]
    pub fn annihilation(orbital: usize) -> Self {
        Self::new(1.0, [Op::annihilation(orbital)])
    }

    /// Creates the hopping term `c_i^† c_j`.
    #[must_use]
    pub fn one_body(i: usize, j: usize) -> Self {
        Self::new(1.0, [Op::creation(i), Op::annihilation(j)])
    }

    /// Creates the density term `n_i = c_i^† c_i`.
    #[must_use]
    pub fn density(i: usize) -> Self {
        Self::one_body(i, i)
    }

    /// Creates the two-body term `c_i^† c_j^† c_k c_l`.
    #[must_use]
    pub fn two_body(i: usize, j: usize, k: usize, l: usize) -> Self {
        Self::new(
            1.0,
            [
                Op::creation(i),
                Op::creation(j),
                Op::annihilation(k),
                Op::annihilation(l),
            ],
        )
    }

    /// Parses the flat encoding `[kind, orbital, kind, orbital, ...]`.
    ///
    /// Kind codes are `1` creation, `0` annihilation and `-1` identity. The
    /// identity marker is written `[-1, -1]`; an empty slice is the scalar term.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::OddLength`] for odd-length input,
    /// [`TermError::UnknownKind`] for an unrecognised kind code, and
    /// [`TermError::OrbitalOutOfRange`] for a negative orbital on a
    /// non-identity operator. Non-finite coefficients are rejected as
    /// [`TermError::NumericDegenerate`].
    pub fn from_flat(coeff: impl Into<Complex64>, flat: &[i64]) -> Result<Self, TermError> {
        if flat.len() % 2 != 0 {
            return Err(TermError::OddLength { len: flat.len() });
        }

        let mut ops = OpString::with_capacity(flat.len() / 2);
        for (position, pair) in flat.chunks_exact(2).enumerate() {
            let kind = OpKind::from_code(pair[0]).ok_or(TermError::UnknownKind {
                code: pair[0],
                position,
            })?;
            if kind == OpKind::Identity {
                ops.push(Op::IDENTITY);
                continue;
            }
            let orbital = usize::try_from(pair[1]).map_err(|_| TermError::OrbitalOutOfRange {
                orbital: pair[1],
                num_orbitals: usize::MAX,
            })?;
            ops.push(Op { kind, orbital });
        }

        if ops.is_empty() {
            ops.push(Op::IDENTITY);
        }
        Self::try_new(coeff, ops)
    }

    /// Returns the flat encoding `[kind, orbital, ...]` of the string.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_flat(&self) -> Vec<i64> {
        let mut flat = Vec::with_capacity(2 * self.ops.len());
        for op in &self.ops {
            if op.is_identity() {
                flat.extend([-1, -1]);
            } else {
                flat.push(op.kind.code());
                flat.push(op.orbital as i64);
            }
        }
        flat
    }

    /// Returns the coefficient.
    #[must_use]
    pub fn coeff(&self) -> Complex64 {
        self.coeff
    }

    /// Returns the operator string.
    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Splits the term into its coefficient and string.
    #[must_use]
    pub fn into_parts(self) -> (Complex64, OpString) {
        (self.coeff, self.ops)
    }

    pub(crate) fn from_parts(coeff: Complex64, ops: OpString) -> Self {
        Self { coeff, ops }
    }

    pub(crate) fn add_coeff(&mut self, c: Complex64) {
        self.coeff += c;
    }

    /// Returns true if the string contains no actual operator.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.ops.iter().all(Op::is_identity)
    }

    /// Number of creation and annihilation operators in the string.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.ops.iter().filter(|op| !op.is_identity()).count()
    }

    /// Returns the term with its coefficient multiplied by `factor`.
    #[must_use]
    pub fn scale(&self, factor: impl Into<Complex64>) -> Self {
        Self {
            coeff: self.coeff * factor.into(),
            ops: self.ops.clone(),
        }
    }

    /// Returns the formal product: coefficients multiply, strings concatenate.
    ///
    /// A scalar factor contributes no identity marker to the product string,
    /// so `t * 2` and `t.scale(2)` carry the same string.
    #[must_use]
    pub fn product(&self, other: &Self) -> Self {
        let coeff = self.coeff * other.coeff;
        let ops = match (self.is_scalar(), other.is_scalar()) {
            (true, true) => OpString::from_slice(&[Op::IDENTITY]),
            (true, false) => other.ops.clone(),
            (false, true) => self.ops.clone(),
            (false, false) => {
                let mut ops = OpString::with_capacity(self.ops.len() + other.ops.len());
                ops.extend_from_slice(&self.ops);
                ops.extend_from_slice(&other.ops);
                ops
            }
        };
        Self { coeff, ops }
    }

    /// Returns the Hermitian conjugate.
    ///
    /// The string is reversed, every operator is replaced by its adjoint and
    /// the coefficient is complex-conjugated.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self {
            coeff: self.coeff.conj(),
            ops: self.ops.iter().rev().map(Op::adjoint).collect(),
        }
    }

    /// Checks that the coefficient is finite.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::NumericDegenerate`] for NaN or infinite parts.
    pub fn check_finite(&self) -> Result<(), TermError> {
        if self.coeff.re.is_finite() && self.coeff.im.is_finite() {
            Ok(())
        } else {
            Err(TermError::NumericDegenerate {
                re: self.coeff.re,
                im: self.coeff.im,
            })
        }
    }

    /// Checks that every orbital lies below `num_orbitals` and the coefficient is finite.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::OrbitalOutOfRange`] or [`TermError::NumericDegenerate`].
    #[allow(clippy::cast_possible_wrap)]
    pub fn validate(&self, num_orbitals: usize) -> Result<(), TermError> {
        if let Some(op) = self
            .ops
            .iter()
            .find(|op| !op.is_identity() && op.orbital >= num_orbitals)
        {
            return Err(TermError::OrbitalOutOfRange {
                orbital: op.orbital as i64,
                num_orbitals,
            });
        }
        self.check_finite()
    }

    /// Returns true if the string is in normal-ordered canonical form.
    ///
    /// Creations precede annihilations, creation orbitals strictly ascend,
    /// annihilation orbitals strictly descend, and the identity marker only
    /// appears alone.
    #[must_use]
    pub fn is_normal_ordered(&self) -> bool {
        if self.ops.len() == 1 && self.ops[0].is_identity() {
            return true;
        }
        if self.ops.iter().any(Op::is_identity) {
            return false;
        }
        self.ops.windows(2).all(|w| match (w[0].kind, w[1].kind) {
            (OpKind::Creation, OpKind::Creation) => w[0].orbital < w[1].orbital,
            (OpKind::Annihilation, OpKind::Annihilation) => w[0].orbital > w[1].orbital,
            (OpKind::Creation, OpKind::Annihilation) => true,
            _ => false,
        })
    }
}

impl From<f64> for Term {
    fn from(c: f64) -> Self {
        Term::identity(c)
    }
}

impl From<Complex64> for Term {
    fn from(c: Complex64) -> Self {
        Term::identity(c)
    }
}

impl From<Op> for Term {
    fn from(op: Op) -> Self {
        Term::new(1.0, [op])
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}{:+.6}i)", self.coeff.re, self.coeff.im)?;
        for op in &self.ops {
            if !op.is_identity() {
                write!(f, " {op}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_roundtrip() {
        let t = Term::from_flat(2.0, &[1, 0, 0, 1]).unwrap();
        assert_eq!(t.ops(), &[Op::creation(0), Op::annihilation(1)]);
        assert_eq!(t.to_flat(), vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_flat_errors() {
        assert_eq!(
            Term::from_flat(1.0, &[1, 0, 0]),
            Err(TermError::OddLength { len: 3 })
        );
        assert!(matches!(
            Term::from_flat(1.0, &[3, 0]),
            Err(TermError::UnknownKind { code: 3, position: 0 })
        ));
        assert!(matches!(
            Term::from_flat(1.0, &[1, -2]),
            Err(TermError::OrbitalOutOfRange { orbital: -2, .. })
        ));
        assert!(matches!(
            Term::from_flat(f64::NAN, &[1, 0, 0, 0]),
            Err(TermError::NumericDegenerate { .. })
        ));
    }

    #[test]
    fn test_flat_identity() {
        let t = Term::from_flat(3.0, &[]).unwrap();
        assert!(t.is_scalar());
        assert_eq!(t.to_flat(), vec![-1, -1]);

        let t = Term::from_flat(3.0, &[-1, -1]).unwrap();
        assert_eq!(t, Term::identity(3.0));
    }

    #[test]
    fn test_conjugate() {
        let t = Term::new(Complex64::new(1.0, 2.0), [Op::creation(0), Op::annihilation(1)]);
        let c = t.conjugate();
        assert_eq!(c.coeff(), Complex64::new(1.0, -2.0));
        assert_eq!(c.ops(), &[Op::creation(1), Op::annihilation(0)]);
        assert_eq!(c.conjugate(), t);
    }

    #[test]
    fn test_validate() {
        let t = Term::two_body(0, 1, 5, 2);
        assert!(t.validate(6).is_ok());
        assert_eq!(
            t.validate(5),
            Err(TermError::OrbitalOutOfRange {
                orbital: 5,
                num_orbitals: 5
            })
        );
    }

    #[test]
    fn test_normal_ordered() {
        assert!(Term::two_body(0, 2, 3, 1).is_normal_ordered());
        assert!(!Term::two_body(2, 0, 3, 1).is_normal_ordered());
        assert!(!Term::two_body(0, 2, 1, 3).is_normal_ordered());
        assert!(!Term::new(1.0, [Op::annihilation(0), Op::creation(1)]).is_normal_ordered());
        assert!(Term::identity(1.0).is_normal_ordered());
        assert!(!Term::new(1.0, [Op::IDENTITY, Op::creation(1)]).is_normal_ordered());
    }

    #[test]
    fn test_product() {
        let a = Term::new(2.0, [Op::creation(0)]);
        let b = Term::new(3.0, [Op::annihilation(1)]);
        let ab = a.product(&b);
        assert_eq!(ab.coeff(), Complex64::new(6.0, 0.0));
        assert_eq!(ab.ops(), &[Op::creation(0), Op::annihilation(1)]);

        let scaled = ab.product(&Term::identity(0.5));
        assert_eq!(scaled, ab.scale(0.5));
    }
}
