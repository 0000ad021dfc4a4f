//! Crate-wide error type.

use sfera_basis::BasisError;
use sfera_models::ModelError;
use sfera_opmat::OpMatError;
use sfera_terms::TermError;
use thiserror::Error;

/// Any error raised by the sfera crates.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Term construction or simplification failed.
    #[error("term error: {0}")]
    Term(#[from] TermError),

    /// Configuration or basis construction failed.
    #[error("basis error: {0}")]
    Basis(#[from] BasisError),

    /// Matrix assembly or application failed.
    #[error("operator matrix error: {0}")]
    OpMat(#[from] OpMatError),

    /// A model generator failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
