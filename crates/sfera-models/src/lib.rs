//! # sfera-models
//!
//! Term generators and symmetries for fermions in the lowest Landau level on
//! the fuzzy sphere.
//!
//! This crate provides:
//! - Wigner 3j symbols with doubled-integer arguments
//! - Density-density interactions from Haldane pseudopotentials
//! - Flavor polarization terms
//! - Angular-momentum observables `L_z`, `L⁺`, `L⁻`, `L²`
//! - The quadratic Casimir of Sp(N) flavor symmetry
//! - Conserved quantities and discrete symmetries of a shell
//!
//! ## Orbitals
//!
//! A shell of `nm = 2s + 1` orbitals per flavor and `nf` flavors uses orbital
//! index `o = m_index * nf + f` with `m = m_index - s`.
//!
//! ```
//! use sfera_models::{l2_terms, density_interaction_terms};
//!
//! let h = density_interaction_terms(4, 2, &[1.0, 0.5], None, None).unwrap();
//! let l2 = l2_terms(4, 2).unwrap();
//! assert!(!h.is_empty() && !l2.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod angular;
pub mod casimir;
pub mod error;
pub mod interaction;
pub mod quantum_numbers;
pub mod shell;
pub mod symmetries;
pub mod wigner;


pub use angular::{l2_terms, lminus_terms, lplus_terms, lz_terms};
pub use casimir::spn_c2_terms;
pub use error::ModelError;
pub use interaction::{density_interaction_terms, polarization_terms, FlavorMatrix};
pub use quantum_numbers::{flavor_number, particle_number, twice_lz};
pub use shell::Shell;
pub use symmetries::{flavor_permutation, particle_hole, rotation_y};
pub use wigner::{wigner_3j, Wigner3j};
