//! Shape, range and permutation checks shared across the crate.

use crate::errors::{MeshError, MeshResult};

/// Check that every index is `< limit`.
pub fn check_indices(indices: &[usize], limit: usize, what: &'static str) -> MeshResult<()> {
    match indices.iter().find(|&&index| index >= limit) {
        Some(&index) => Err(MeshError::IndexOutOfRange { what, index, limit }),
        None => Ok(()),
    }
}

/// Check that `arity` is 3 or 4.
pub fn check_arity(arity: usize) -> MeshResult<()> {
    match arity {
        3 | 4 => Ok(()),
        other => Err(MeshError::UnsupportedArity(other)),
    }
}

/// Check that `mask` has one entry per element.
pub fn check_mask_length(mask: &[bool], len: usize, what: &'static str) -> MeshResult<()> {
    if mask.len() == len {
        Ok(())
    } else {
        Err(MeshError::MaskLength {
            what,
            expected: len,
            actual: mask.len(),
        })
    }
}

/// Check that `order` is a permutation of `0..len` and return its inverse
/// (`inverse[order[i]] == i`).
pub fn check_permutation(order: &[usize], len: usize, what: &'static str) -> MeshResult<Vec<usize>> {
    let not_a_permutation = || MeshError::NotAPermutation { what, len };
    if order.len() != len {
        return Err(not_a_permutation());
    }
    let mut inverse = vec![usize::MAX; len];
    for (new_index, &old_index) in order.iter().enumerate() {
        match inverse.get_mut(old_index) {
            Some(slot) if *slot == usize::MAX => *slot = new_index,
            _ => return Err(not_a_permutation()),
        }
    }
    Ok(inverse)
}
