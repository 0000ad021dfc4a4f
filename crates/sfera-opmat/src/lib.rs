//! # sfera-opmat
//!
//! Sparse operator matrices for the sfera exact-diagonalization engine.
//!
//! This crate provides:
//! - Parallel assembly of simplified operators between two bases
//! - CSR storage with duplicate entries summed and small entries dropped
//! - Matrix-vector products, expectation values and Hermiticity checks
//!
//! ## Example
//!
//! ```
//! use sfera_basis::{Basis, Confs, Conserved};
//! use sfera_opmat::{AssemblyConfig, OpMat};
//! use sfera_terms::{simplify, TermSum};
//!
//! let confs = Confs::new(2, vec![Conserved::new(vec![1, 1], 1)]).unwrap();
//! let basis = Basis::trivial(confs);
//! let hop = simplify(&TermSum::hopping(0, 1)).unwrap();
//! let m = OpMat::assemble(&basis, &basis, &hop, &AssemblyConfig::default()).unwrap();
//! assert!(m.is_hermitian(1e-14));
//! assert_eq!(m.nnz(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod opmat;


pub use config::AssemblyConfig;
pub use error::OpMatError;
pub use opmat::OpMat;
