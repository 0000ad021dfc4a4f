//! Term simplification.
//!
//! Simplification normal-orders every term, sorts the results by the
//! canonical string order, merges equal strings and drops negligible
//! coefficients. The output type [`NormalTerms`] is only produced here, so a
//! value of that type is always canonical.

use std::fmt;

use log::debug;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::error::TermError;
use crate::normal_order::normal_order;
use crate::op::Op;
use crate::ordering::{cmp_lex, cmp_terms};
use crate::sum::TermSum;
use crate::term::Term;

/// Coefficients with magnitude at or below this are dropped by default.
pub const DEFAULT_THRESHOLD: f64 = 1e-13;

/// Checks that `threshold` is finite and non-negative.
///
/// # Errors
///
/// Returns [`TermError::InvalidThreshold`] otherwise.
pub fn check_threshold(threshold: f64) -> Result<(), TermError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(TermError::InvalidThreshold { threshold })
    }
}

/// Configuration for the simplifier.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplifierConfig {
    /// Merged coefficients with `|c| <= threshold` are removed.
    pub threshold: f64,
    /// Minimum number of input terms to normal-order in parallel.
    pub parallel_threshold: usize,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel_threshold: 4096,
        }
    }
}

impl SimplifierConfig {
    /// Sets the negligibility threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the input size from which normal ordering runs on the rayon pool.
    #[must_use]
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}

/// A canonical sum of terms.
///
/// Every term is normal-ordered, no two terms share a string, every
/// coefficient is finite and above the simplifier threshold, and terms are
/// sorted by [`cmp_lex`].
#[derive(Clone, PartialEq, Debug, Default)]
pub struct NormalTerms {
    terms: Vec<Term>,
}

impl NormalTerms {
    /// The empty (zero) operator.
    #[must_use]
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the operator is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the terms in canonical order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Iterates over the terms.
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Returns the coefficient of a normal-ordered string, if present.
    #[must_use]
    pub fn coeff_of(&self, ops: &[Op]) -> Option<Complex64> {
        self.terms
            .binary_search_by(|t| cmp_lex(t.ops(), ops))
            .ok()
            .map(|i| self.terms[i].coeff())
    }

    /// Returns the largest number of operators in a term.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.terms.iter().map(Term::degree).max().unwrap_or(0)
    }

    /// Returns true if both operators have the same strings and coefficients
    /// within `tol`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.len() == other.len()
            && self
                .terms
                .iter()
                .zip(&other.terms)
                .all(|(a, b)| a.ops() == b.ops() && (a.coeff() - b.coeff()).norm() <= tol)
    }

    /// Copies the terms into a raw sum for further algebra.
    #[must_use]
    pub fn to_sum(&self) -> TermSum {
        TermSum::from_terms(self.terms.clone())
    }

    /// Converts into a raw sum for further algebra.
    #[must_use]
    pub fn into_sum(self) -> TermSum {
        TermSum::from_terms(self.terms)
    }
}

impl From<NormalTerms> for TermSum {
    fn from(terms: NormalTerms) -> Self {
        terms.into_sum()
    }
}

impl<'a> IntoIterator for &'a NormalTerms {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl fmt::Display for NormalTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sum())
    }
}

/// The term simplifier.
#[derive(Clone, Debug, Default)]
pub struct Simplifier {
    config: SimplifierConfig,
}

impl Simplifier {
    /// Creates a simplifier with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simplifier with a custom configuration.
    #[must_use]
    pub fn with_config(config: SimplifierConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Simplifies a sum into canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::InvalidThreshold`] if the configured threshold is
    /// negative or not finite, and [`TermError::NumericDegenerate`] if an
    /// input coefficient or a merged coefficient is not finite.
    pub fn simplify(&self, sum: &TermSum) -> Result<NormalTerms, TermError> {
        check_threshold(self.config.threshold)?;
        sum.check_finite()?;

        let mut reduced: Vec<Term> = if sum.len() >= self.config.parallel_threshold {
            sum.terms().par_iter().flat_map_iter(normal_order).collect()
        } else {
            sum.iter().flat_map(normal_order).collect()
        };
        let num_reduced = reduced.len();

        reduced.sort_by(cmp_terms);

        let mut merged: Vec<Term> = Vec::with_capacity(reduced.len());
        for term in reduced {
            match merged.last_mut() {
                Some(last) if last.ops() == term.ops() => last.add_coeff(term.coeff()),
                _ => merged.push(term),
            }
        }

        merged.iter().try_for_each(Term::check_finite)?;
        merged.retain(|t| t.coeff().norm() > self.config.threshold);

        debug!(
            "simplify: {} terms -> {} normal-ordered -> {} canonical",
            sum.len(),
            num_reduced,
            merged.len()
        );
        Ok(NormalTerms { terms: merged })
    }

    /// Simplifies the product of two operators.
    ///
    /// # Errors
    ///
    /// See [`Simplifier::simplify`].
    pub fn product(&self, a: &NormalTerms, b: &NormalTerms) -> Result<NormalTerms, TermError> {
        self.simplify(&a.to_sum().multiply(&b.to_sum()))
    }

    /// Simplifies the commutator `[a, b] = ab - ba`.
    ///
    /// # Errors
    ///
    /// See [`Simplifier::simplify`].
    pub fn commutator(&self, a: &TermSum, b: &TermSum) -> Result<NormalTerms, TermError> {
        self.simplify(&a.multiply(b).subtract(&b.multiply(a)))
    }

    /// Returns the simplified Hermitian conjugate.
    ///
    /// # Errors
    ///
    /// See [`Simplifier::simplify`].
    pub fn conjugate(&self, terms: &NormalTerms) -> Result<NormalTerms, TermError> {
        self.simplify(&terms.to_sum().conjugate())
    }

    /// Returns true if the operator equals its Hermitian conjugate up to the threshold.
    ///
    /// # Errors
    ///
    /// See [`Simplifier::simplify`].
    pub fn is_hermitian(&self, terms: &NormalTerms) -> Result<bool, TermError> {
        let conj = self.conjugate(terms)?;
        Ok(conj.approx_eq(terms, self.config.threshold))
    }
}

/// Simplifies a sum with the default configuration.
///
/// # Errors
///
/// See [`Simplifier::simplify`].
pub fn simplify(sum: &TermSum) -> Result<NormalTerms, TermError> {
    Simplifier::new().simplify(sum)
}
