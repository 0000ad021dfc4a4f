//! Fock-space bit operations.
//!
//! A configuration is a `u64` occupation mask: bit `o` is set when orbital
//! `o` is occupied. The state it denotes is
//!
//! ```text
//! |c> = c†_{o1} c†_{o2} ... c†_{ok} |0>,   o1 < o2 < ... < ok
//! ```
//!
//! so moving an operator on orbital `o` into place passes every occupied
//! orbital below `o`, giving the sign `(-1)^{#occupied below o}`.

use sfera_terms::{Op, OpKind};

/// Largest number of orbitals a configuration can hold.
pub const MAX_ORBITALS: usize = 64;

/// Returns true if orbital `o` is occupied.
#[must_use]
pub fn is_occupied(config: u64, orbital: usize) -> bool {
    orbital < MAX_ORBITALS && config & (1 << orbital) != 0
}

/// Builds a configuration from occupied orbitals.
///
/// # Panics
///
/// Panics if an orbital is 64 or larger.
#[must_use]
pub fn config_from_orbitals(orbitals: &[usize]) -> u64 {
    orbitals.iter().fold(0, |acc, &o| {
        assert!(o < MAX_ORBITALS, "orbital {o} out of range");
        acc | (1 << o)
    })
}

/// Iterates over the occupied orbitals in ascending order.
pub fn occupied_orbitals(config: u64) -> impl Iterator<Item = usize> {
    let mut rest = config;
    std::iter::from_fn(move || {
        if rest == 0 {
            return None;
        }
        let o = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        Some(o)
    })
}

/// Applies one operator, returning the new configuration and sign.
///
/// Returns `None` if the operator annihilates the state (creation on an
/// occupied orbital, annihilation on an empty one) or the orbital does not
/// fit in a mask.
#[must_use]
pub fn apply_op(op: &Op, config: u64) -> Option<(u64, f64)> {
    if op.kind == OpKind::Identity {
        return Some((config, 1.0));
    }
    let bit = 1u64.checked_shl(u32::try_from(op.orbital).ok()?)?;
    let next = match op.kind {
        OpKind::Creation if config & bit == 0 => config | bit,
        OpKind::Annihilation if config & bit != 0 => config & !bit,
        _ => return None,
    };
    let below = (config & (bit - 1)).count_ones();
    let sign = if below % 2 == 0 { 1.0 } else { -1.0 };
    Some((next, sign))
}

/// Applies an operator string right to left.
#[must_use]
pub fn apply_string(ops: &[Op], config: u64) -> Option<(u64, f64)> {
    ops.iter().rev().try_fold((config, 1.0), |(c, sign), op| {
        apply_op(op, c).map(|(next, s)| (next, sign * s))
    })
}
