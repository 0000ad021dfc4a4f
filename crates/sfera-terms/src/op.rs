//! Single fermionic operators.
//!
//! An operator is a kind (creation, annihilation or the identity marker)
//! acting on one orbital. Operator strings are ordered sequences of these.

use std::fmt;

/// The kind of a single operator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OpKind {
    /// Removes a fermion from an orbital, `c_o`.
    Annihilation,
    /// Adds a fermion to an orbital, `c_o^†`.
    Creation,
    /// No operator. Marks the scalar string and is removed from longer strings.
    Identity,
}

impl OpKind {
    /// Returns the flat integer code: `0` annihilation, `1` creation, `-1` identity.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            OpKind::Annihilation => 0,
            OpKind::Creation => 1,
            OpKind::Identity => -1,
        }
    }

    /// Parses a flat integer code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(OpKind::Annihilation),
            1 => Some(OpKind::Creation),
            -1 => Some(OpKind::Identity),
            _ => None,
        }
    }

    /// Exchanges creation and annihilation; the identity is its own adjoint.
    #[must_use]
    pub const fn adjoint(self) -> Self {
        match self {
            OpKind::Annihilation => OpKind::Creation,
            OpKind::Creation => OpKind::Annihilation,
            OpKind::Identity => OpKind::Identity,
        }
    }

    /// Rank used as the tie-break of the canonical string order.
    pub(crate) const fn rank(self) -> u8 {
        match self {
            OpKind::Identity => 0,
            OpKind::Annihilation => 1,
            OpKind::Creation => 2,
        }
    }
}

/// A single operator acting on an orbital.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Op {
    /// The operator kind.
    pub kind: OpKind,
    /// The orbital index. Meaningless (zero) for the identity marker.
    pub orbital: usize,
}

impl Op {
    /// The identity marker.
    pub const IDENTITY: Op = Op {
        kind: OpKind::Identity,
        orbital: 0,
    };

    /// Creates the creation operator `c_o^†`.
    #[must_use]
    pub const fn creation(orbital: usize) -> Self {
        Self {
            kind: OpKind::Creation,
            orbital,
        }
    }

    /// Creates the annihilation operator `c_o`.
    #[must_use]
    pub const fn annihilation(orbital: usize) -> Self {
        Self {
            kind: OpKind::Annihilation,
            orbital,
        }
    }

    /// Returns true if this is the identity marker.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self.kind, OpKind::Identity)
    }

    /// Returns the Hermitian adjoint of this operator.
    #[must_use]
    pub const fn adjoint(&self) -> Self {
        Self {
            kind: self.kind.adjoint(),
            orbital: self.orbital,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OpKind::Annihilation => write!(f, "c({})", self.orbital),
            OpKind::Creation => write!(f, "c†({})", self.orbital),
            OpKind::Identity => write!(f, "1"),
        }
    }
}
