//! # sfera-terms
//!
//! Symbolic fermionic operator algebra for the sfera exact-diagonalization
//! engine.
//!
//! This crate provides:
//! - Operators `c_o^†`, `c_o` and operator strings
//! - Terms (complex coefficient times a string) and formal sums
//! - Term algebra: scaling, negation, sum, product, Hermitian conjugation
//! - Normal ordering under the canonical anticommutation relations
//! - Simplification into canonical, merged, thresholded term lists
//!
//! ## Raw and canonical sums
//!
//! [`TermSum`] is a formal sum that may repeat strings and is closed under
//! the algebra. [`NormalTerms`] is only produced by the [`Simplifier`] and is
//! what matrix assembly consumes.
//!
//! ```
//! use sfera_terms::{simplify, Term, TermSum};
//!
//! // c_i c_i^† = 1 - c_i^† c_i
//! let sum = TermSum::from(Term::annihilation(0)) * Term::creation(0);
//! let canonical = simplify(&sum).unwrap();
//! assert_eq!(canonical.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod normal_order;
pub mod op;
pub mod ordering;
pub mod simplify;
pub mod sum;
pub mod term;

#[cfg(test)]
mod proptests;

pub use error::TermError;
pub use normal_order::normal_order;
pub use op::{Op, OpKind};
pub use simplify::{check_threshold, simplify, NormalTerms, Simplifier, SimplifierConfig, DEFAULT_THRESHOLD};
pub use sum::TermSum;
pub use term::{OpString, Term};
