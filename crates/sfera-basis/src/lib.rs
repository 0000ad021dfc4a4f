//! # sfera-basis
//!
//! Many-body bases for the sfera exact-diagonalization engine.
//!
//! This crate provides:
//! - Fock-space bit operations on occupation masks with fermionic signs
//! - Configuration sets constrained by additive and Z_n conserved quantities
//! - Discrete symmetries with phases and particle-hole transformations
//! - Symmetry-adapted bases for abelian symmetry sectors
//!
//! ## Example
//!
//! ```
//! use sfera_basis::{Basis, Confs, Conserved, Sector, Symmetry};
//!
//! // One fermion on two orbitals, odd under exchanging them
//! let confs = Confs::new(2, vec![Conserved::new(vec![1, 1], 1)]).unwrap();
//! let swap = Symmetry::permutation(vec![1, 0], 2).unwrap();
//! let basis = Basis::new(confs, &[Sector::new(swap, -1.0).unwrap()]).unwrap();
//! assert_eq!(basis.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod basis;
pub mod confs;
pub mod error;
pub mod fock;
pub mod symmetry;

#[cfg(test)]
mod proptests;

pub use basis::Basis;
pub use confs::{Confs, Conserved};
pub use error::BasisError;
pub use fock::{apply_op, apply_string, config_from_orbitals, occupied_orbitals, MAX_ORBITALS};
pub use symmetry::{Sector, Symmetry};
