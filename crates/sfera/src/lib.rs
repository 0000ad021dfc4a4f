//! # sfera
//!
//! Fermionic operator algebra and exact diagonalization building blocks for
//! models on the fuzzy sphere.
//!
//! This crate provides:
//! - Operator terms, term algebra and canonical simplification ([`terms`])
//! - Configurations, symmetries and symmetry-adapted bases ([`basis`])
//! - Sparse operator matrices between bases ([`opmat`])
//! - Fuzzy-sphere interactions, observables and symmetries ([`models`])
//! - An [`Engine`] that runs simplification and assembly under one
//!   [`EngineConfig`]
//!
//! ## Quick Start
//!
//! ```
//! use sfera::prelude::*;
//!
//! // Two flavors, three orbitals each, three particles with L_z = 0
//! let (nm, nf) = (3, 2);
//! let confs = Confs::new(
//!     nm * nf,
//!     vec![particle_number(nm, nf, 3)?, twice_lz(nm, nf, 0)?],
//! )?;
//! let basis = Basis::trivial(confs);
//!
//! let engine = Engine::new();
//! let h = density_interaction_terms(nm, nf, &[1.0, 0.5], None, None)?;
//! let hmat = engine.assemble(&basis, &basis, &h)?;
//! assert!(hmat.is_hermitian(1e-12));
//! # Ok::<(), sfera::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod error;

pub use sfera_basis as basis;
pub use sfera_models as models;
pub use sfera_opmat as opmat;
pub use sfera_terms as terms;

pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{Engine, EngineConfig, Error};
    pub use num_complex::Complex64;
    pub use sfera_basis::{Basis, Confs, Conserved, Sector, Symmetry};
    pub use sfera_models::{
        density_interaction_terms, flavor_number, flavor_permutation, l2_terms, lminus_terms,
        lplus_terms, lz_terms, particle_hole, particle_number, polarization_terms, rotation_y,
        spn_c2_terms, twice_lz, wigner_3j,
    };
    pub use sfera_opmat::{AssemblyConfig, OpMat};
    pub use sfera_terms::{
        simplify, NormalTerms, Op, OpKind, Simplifier, SimplifierConfig, Term, TermSum,
    };
}
