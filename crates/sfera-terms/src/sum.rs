//! Formal sums of terms and their algebra.
//!
//! A [`TermSum`] is an un-normalized sum: terms may repeat strings, need not
//! be normal-ordered and keep zero coefficients. Every operation returns a
//! new value. Use [`crate::Simplifier`] to obtain canonical [`crate::NormalTerms`].

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::error::TermError;
use crate::op::Op;
use crate::term::Term;

/// A formal sum of terms.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TermSum {
    terms: Vec<Term>,
}

impl TermSum {
    /// Creates the empty sum (zero).
    #[must_use]
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Creates a sum from terms.
    #[must_use]
    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Creates the scalar sum `c * 1`.
    #[must_use]
    pub fn scalar(c: impl Into<Complex64>) -> Self {
        Self {
            terms: vec![Term::identity(c)],
        }
    }

    /// Creates the hopping pair `c_i^† c_j + c_j^† c_i`.
    #[must_use]
    pub fn hopping(i: usize, j: usize) -> Self {
        Self {
            terms: vec![Term::one_body(i, j), Term::one_body(j, i)],
        }
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the sum has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the terms.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Consumes the sum, returning its terms.
    #[must_use]
    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    /// Iterates over the terms.
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Appends a term.
    pub fn push(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// Multiplies every coefficient by `factor`.
    ///
    /// A zero factor keeps the (now zero) terms.
    #[must_use]
    pub fn scale(&self, factor: impl Into<Complex64>) -> Self {
        let factor = factor.into();
        Self {
            terms: self.terms.iter().map(|t| t.scale(factor)).collect(),
        }
    }

    /// Negates every coefficient.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Formal union: concatenates the terms of both sums without merging.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut terms = Vec::with_capacity(self.len() + other.len());
        terms.extend_from_slice(&self.terms);
        terms.extend_from_slice(&other.terms);
        Self { terms }
    }

    /// Returns `self + (-other)`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.union(&other.negate())
    }

    /// Formal product.
    ///
    /// Every pair `(a, b)` of the cross product, in `self`-major order,
    /// yields one term with the product coefficient and concatenated string.
    /// The result is neither normal-ordered nor merged.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut terms = Vec::with_capacity(self.len() * other.len());
        for a in &self.terms {
            for b in &other.terms {
                terms.push(a.product(b));
            }
        }
        Self { terms }
    }

    /// Hermitian conjugate, term by term.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self {
            terms: self.terms.iter().map(Term::conjugate).collect(),
        }
    }

    /// Raises the sum to a non-negative integer power by repeated products.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::scalar(1.0);
        for _ in 0..n {
            result = result.multiply(self);
        }
        result
    }

    /// Validates every term against the number of orbitals.
    ///
    /// # Errors
    ///
    /// Returns the first [`TermError`] found.
    pub fn validate(&self, num_orbitals: usize) -> Result<(), TermError> {
        self.terms.iter().try_for_each(|t| t.validate(num_orbitals))
    }

    /// Checks that every coefficient is finite.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::NumericDegenerate`] for the first non-finite coefficient.
    pub fn check_finite(&self) -> Result<(), TermError> {
        self.terms.iter().try_for_each(Term::check_finite)
    }
}

impl FromIterator<Term> for TermSum {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<Term> for TermSum {
    fn extend<I: IntoIterator<Item = Term>>(&mut self, iter: I) {
        self.terms.extend(iter);
    }
}

impl IntoIterator for TermSum {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a TermSum {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl From<Term> for TermSum {
    fn from(term: Term) -> Self {
        Self { terms: vec![term] }
    }
}

impl From<Op> for TermSum {
    fn from(op: Op) -> Self {
        Self::from(Term::from(op))
    }
}

impl From<f64> for TermSum {
    fn from(c: f64) -> Self {
        Self::scalar(c)
    }
}

impl From<Complex64> for TermSum {
    fn from(c: Complex64) -> Self {
        Self::scalar(c)
    }
}

impl From<Vec<Term>> for TermSum {
    fn from(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

impl<T: Into<TermSum>> Add<T> for TermSum {
    type Output = TermSum;

    fn add(mut self, rhs: T) -> Self::Output {
        self.terms.extend(rhs.into().terms);
        self
    }
}

impl<T: Into<TermSum>> Sub<T> for TermSum {
    type Output = TermSum;

    fn sub(mut self, rhs: T) -> Self::Output {
        self.terms.extend(rhs.into().terms.iter().map(|t| t.scale(-1.0)));
        self
    }
}

impl<T: Into<TermSum>> Mul<T> for TermSum {
    type Output = TermSum;

    fn mul(self, rhs: T) -> Self::Output {
        TermSum::multiply(&self, &rhs.into())
    }
}

impl Neg for TermSum {
    type Output = TermSum;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl<T: Into<TermSum>> Add<T> for Term {
    type Output = TermSum;

    fn add(self, rhs: T) -> Self::Output {
        TermSum::from(self) + rhs
    }
}

impl<T: Into<TermSum>> Sub<T> for Term {
    type Output = TermSum;

    fn sub(self, rhs: T) -> Self::Output {
        TermSum::from(self) - rhs
    }
}

impl<T: Into<TermSum>> Mul<T> for Term {
    type Output = TermSum;

    fn mul(self, rhs: T) -> Self::Output {
        TermSum::from(self) * rhs
    }
}

impl<T: Into<TermSum>> Add<T> for Op {
    type Output = TermSum;

    fn add(self, rhs: T) -> Self::Output {
        TermSum::from(self) + rhs
    }
}

impl<T: Into<TermSum>> Mul<T> for Op {
    type Output = TermSum;

    fn mul(self, rhs: T) -> Self::Output {
        TermSum::from(self) * rhs
    }
}

impl Mul<TermSum> for f64 {
    type Output = TermSum;

    fn mul(self, rhs: TermSum) -> Self::Output {
        rhs.scale(self)
    }
}

impl Mul<TermSum> for Complex64 {
    type Output = TermSum;

    fn mul(self, rhs: TermSum) -> Self::Output {
        rhs.scale(self)
    }
}

impl Mul<Term> for f64 {
    type Output = TermSum;

    fn mul(self, rhs: Term) -> Self::Output {
        TermSum::from(rhs.scale(self))
    }
}

impl Add<TermSum> for f64 {
    type Output = TermSum;

    fn add(self, rhs: TermSum) -> Self::Output {
        TermSum::scalar(self) + rhs
    }
}

impl Sub<TermSum> for f64 {
    type Output = TermSum;

    fn sub(self, rhs: TermSum) -> Self::Output {
        TermSum::scalar(self) - rhs
    }
}

impl Sub<Term> for f64 {
    type Output = TermSum;

    fn sub(self, rhs: Term) -> Self::Output {
        TermSum::scalar(self) - rhs
    }
}

impl fmt::Display for TermSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let parts: Vec<String> = self.terms.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" + "))
    }
}
