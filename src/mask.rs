//! Boolean inclusion masks and the compaction maps derived from them.

use crate::errors::{MeshError, MeshResult};
use crate::validation::check_mask_length;

/// Map each original element to its index after dropping the elements whose
/// mask entry is `false`.
///
/// Kept elements are numbered `0..count` in their original order; dropped
/// elements map to `None`.
///
/// ```
/// use meshcore::mask::compaction_map;
///
/// let map = compaction_map(&[false, true, true, false, true]);
/// assert_eq!(map, vec![None, Some(0), Some(1), None, Some(2)]);
/// ```
pub fn compaction_map(mask: &[bool]) -> Vec<Option<usize>> {
    let mut next = 0;
    mask.iter()
        .map(|&keep| {
            keep.then(|| {
                next += 1;
                next - 1
            })
        })
        .collect()
}

/// The indices of the `true` entries, ascending.
pub fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect()
}

/// Scatter `indices` into a fresh mask of `len` elements.
pub fn mask_from_indices(
    indices: &[usize],
    len: usize,
    what: &'static str,
) -> MeshResult<Vec<bool>> {
    let mut mask = vec![false; len];
    for &index in indices {
        if index >= len {
            return Err(MeshError::IndexOutOfRange {
                what,
                index,
                limit: len,
            });
        }
        mask[index] = true;
    }
    Ok(mask)
}

/// `target &= other`, element-wise.
pub(crate) fn and_assign(target: &mut [bool], other: &[bool]) {
    for (t, &o) in target.iter_mut().zip(other) {
        *t &= o;
    }
}

/// `target |= other`, element-wise.
pub(crate) fn or_assign(target: &mut [bool], other: &[bool]) {
    for (t, &o) in target.iter_mut().zip(other) {
        *t |= o;
    }
}

/// An explicit choice of elements, either by index or by a full-length mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick<'a> {
    ByIndices(&'a [usize]),
    ByMask(&'a [bool]),
}

impl Pick<'_> {
    /// Resolve to a canonical mask over `len` elements.
    pub fn to_mask(&self, len: usize, what: &'static str) -> MeshResult<Vec<bool>> {
        match *self {
            Pick::ByIndices(indices) => mask_from_indices(indices, len, what),
            Pick::ByMask(mask) => {
                check_mask_length(mask, len, what)?;
                Ok(mask.to_vec())
            },
        }
    }
}

impl<'a> From<&'a [usize]> for Pick<'a> {
    fn from(indices: &'a [usize]) -> Self {
        Pick::ByIndices(indices)
    }
}

impl<'a> From<&'a Vec<usize>> for Pick<'a> {
    fn from(indices: &'a Vec<usize>) -> Self {
        Pick::ByIndices(indices)
    }
}

impl<'a, const N: usize> From<&'a [usize; N]> for Pick<'a> {
    fn from(indices: &'a [usize; N]) -> Self {
        Pick::ByIndices(indices)
    }
}

impl<'a> From<&'a [bool]> for Pick<'a> {
    fn from(mask: &'a [bool]) -> Self {
        Pick::ByMask(mask)
    }
}

impl<'a> From<&'a Vec<bool>> for Pick<'a> {
    fn from(mask: &'a Vec<bool>) -> Self {
        Pick::ByMask(mask)
    }
}

impl<'a, const N: usize> From<&'a [bool; N]> for Pick<'a> {
    fn from(mask: &'a [bool; N]) -> Self {
        Pick::ByMask(mask)
    }
}
