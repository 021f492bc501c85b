//! Named, possibly overlapping groups of elements.
//!
//! A [`GroupMap`] stores one boolean mask per group over a fixed number of
//! elements (typically the faces of a [`crate::Mesh`]). Masks are owned by the
//! map and only ever handed out as `&[bool]`; operations that combine groups
//! return fresh vectors, and operations that change the element space return a
//! new map.

use crate::errors::{MeshError, MeshResult};
use crate::mask::{mask_indices, or_assign};
use crate::validation::check_mask_length;
use hashbrown::HashMap;
use std::fmt;
use tracing::debug;

/// An immutable map of possibly overlapping groups of elements.
///
/// # Example
///
/// ```
/// use meshcore::GroupMap;
///
/// let groups = GroupMap::from_mapping([("top", vec![0, 1]), ("bottom", vec![2, 3])], 4)?;
/// assert_eq!(groups.get("top")?, &[true, true, false, false]);
/// assert_eq!(groups.union(&["top", "bottom"])?, vec![true; 4]);
/// # Ok::<(), meshcore::MeshError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct GroupMap {
    num_elements: usize,
    names: Vec<String>,
    index: HashMap<String, usize>,
    /// Row-major, one row of `num_elements` per group.
    masks: Box<[bool]>,
}

impl GroupMap {
    /// Build from one mask row per group name.
    pub fn new(num_elements: usize, names: Vec<String>, rows: Vec<Vec<bool>>) -> MeshResult<Self> {
        if rows.len() != names.len() {
            return Err(MeshError::WrongShape {
                what: "masks",
                expected: format!("({}, {})", names.len(), num_elements),
                actual: format!("{} rows", rows.len()),
            });
        }
        let mut masks = Vec::with_capacity(names.len() * num_elements);
        for row in &rows {
            check_mask_length(row, num_elements, "group")?;
            masks.extend_from_slice(row);
        }
        Self::from_flat_masks(num_elements, names, masks.into_boxed_slice())
    }

    fn from_flat_masks(num_elements: usize, names: Vec<String>, masks: Box<[bool]>) -> MeshResult<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(MeshError::DuplicateGroup(name.clone()));
            }
        }
        Ok(GroupMap {
            num_elements,
            names,
            index,
            masks,
        })
    }

    /// Build from `(name, element indices)` pairs, keeping their order.
    ///
    /// # Errors
    /// [`MeshError::ElementOutOfRange`] if an index is `>= num_elements`,
    /// [`MeshError::DuplicateGroup`] if a name repeats.
    pub fn from_mapping<I, N, E>(mapping: I, num_elements: usize) -> MeshResult<Self>
    where
        I: IntoIterator<Item = (N, E)>,
        N: Into<String>,
        E: IntoIterator<Item = usize>,
    {
        let mut names = Vec::new();
        let mut masks = Vec::new();
        for (name, elements) in mapping {
            let start = masks.len();
            masks.resize(start + num_elements, false);
            for element in elements {
                if element >= num_elements {
                    return Err(MeshError::ElementOutOfRange {
                        index: element,
                        limit: num_elements,
                    });
                }
                masks[start + element] = true;
            }
            names.push(name.into());
        }
        Self::from_flat_masks(num_elements, names, masks.into_boxed_slice())
    }

    /// The `(name, element indices)` pairs, in group order. Inverse of
    /// [`GroupMap::from_mapping`].
    pub fn to_mapping(&self) -> Vec<(String, Vec<usize>)> {
        self.iter()
            .map(|(name, mask)| (name.to_string(), mask_indices(mask)))
            .collect()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub const fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Group names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Groups and their masks, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[bool])> {
        self.names()
            .enumerate()
            .map(|(i, name)| (name, self.row(i)))
    }

    fn row(&self, i: usize) -> &[bool] {
        &self.masks[i * self.num_elements..(i + 1) * self.num_elements]
    }

    /// The mask of group `name`.
    pub fn get(&self, name: &str) -> MeshResult<&[bool]> {
        self.index
            .get(name)
            .map(|&i| self.row(i))
            .ok_or_else(|| MeshError::UnknownGroup(name.to_string()))
    }

    /// A new mask selecting every element in any of `names`. All unknown
    /// names are reported together.
    pub fn union<S: AsRef<str>>(&self, names: &[S]) -> MeshResult<Vec<bool>> {
        let mut rows = Vec::with_capacity(names.len());
        let mut unknown = Vec::new();
        for name in names {
            match self.index.get(name.as_ref()) {
                Some(&i) => rows.push(i),
                None => unknown.push(name.as_ref().to_string()),
            }
        }
        if !unknown.is_empty() {
            return Err(MeshError::UnknownGroups(unknown));
        }

        let mut mask = vec![false; self.num_elements];
        for i in rows {
            or_assign(&mut mask, self.row(i));
        }
        Ok(mask)
    }

    /// Membership of `element` in each group, in group order.
    pub fn mask_for_element(&self, element: usize) -> MeshResult<Vec<bool>> {
        if element >= self.num_elements {
            return Err(MeshError::ElementOutOfRange {
                index: element,
                limit: self.num_elements,
            });
        }
        Ok((0..self.len()).map(|i| self.row(i)[element]).collect())
    }

    /// Names of the groups flagged in `group_mask` (one entry per group).
    pub fn group_names_for_element_mask(&self, group_mask: &[bool]) -> MeshResult<Vec<&str>> {
        check_mask_length(group_mask, self.len(), "group membership")?;
        Ok(self
            .names()
            .zip(group_mask)
            .filter_map(|(name, &member)| member.then_some(name))
            .collect())
    }

    /// Names of the groups containing `element`, in group order.
    pub fn groups_of_element(&self, element: usize) -> MeshResult<Vec<&str>> {
        let mask = self.mask_for_element(element)?;
        self.group_names_for_element_mask(&mask)
    }

    /// A map over `new_to_old.len()` elements where new element `i` belongs
    /// to the groups of old element `new_to_old[i]`. Old elements may appear
    /// any number of times, e.g. when a face is split in two.
    pub fn reindexed(&self, new_to_old: &[usize]) -> MeshResult<GroupMap> {
        if let Some(&index) = new_to_old.iter().find(|&&old| old >= self.num_elements) {
            return Err(MeshError::ElementOutOfRange {
                index,
                limit: self.num_elements,
            });
        }
        Ok(self.reindexed_unchecked(new_to_old))
    }

    pub(crate) fn reindexed_unchecked(&self, new_to_old: &[usize]) -> GroupMap {
        let masks = (0..self.len())
            .flat_map(|i| {
                let row = self.row(i);
                new_to_old.iter().map(move |&old| row[old])
            })
            .collect();
        GroupMap {
            num_elements: new_to_old.len(),
            names: self.names.clone(),
            index: self.index.clone(),
            masks,
        }
    }

    /// A map over `num_elements` new elements where each new element belongs
    /// to every group of every old element mapped onto it. Old elements
    /// mapped to `None` are dropped.
    pub fn aggregated(&self, old_to_new: &[Option<usize>], num_elements: usize) -> MeshResult<GroupMap> {
        if old_to_new.len() != self.num_elements {
            return Err(MeshError::MaskLength {
                what: "old to new element",
                expected: self.num_elements,
                actual: old_to_new.len(),
            });
        }
        if let Some(index) = old_to_new.iter().flatten().copied().find(|&new| new >= num_elements) {
            return Err(MeshError::ElementOutOfRange {
                index,
                limit: num_elements,
            });
        }
        let mut masks = vec![false; self.len() * num_elements].into_boxed_slice();
        for i in 0..self.len() {
            let row = self.row(i);
            let new_row = &mut masks[i * num_elements..(i + 1) * num_elements];
            for (old, new) in old_to_new.iter().enumerate() {
                if let Some(new) = *new {
                    new_row[new] |= row[old];
                }
            }
        }
        Ok(GroupMap {
            num_elements,
            names: self.names.clone(),
            index: self.index.clone(),
            masks,
        })
    }

    /// An element ordering (new index → old index) that lays each group out
    /// as one contiguous block, in `group_order` or in natural group order.
    /// Elements in no group follow the last block in their original order.
    /// Feed the result to [`crate::reindex_faces`].
    ///
    /// # Errors
    /// - [`MeshError::GroupOrderMissing`] if `group_order` omits a non-empty group
    /// - [`MeshError::GroupOrderUnknown`] if it names groups that do not exist
    /// - [`MeshError::GroupOverlap`] if a group shares elements with an earlier one
    pub fn defragment<S: AsRef<str>>(&self, group_order: Option<&[S]>) -> MeshResult<Vec<usize>> {
        let order: Vec<&str> = match group_order {
            Some(order) => {
                let order: Vec<&str> = order.iter().map(AsRef::as_ref).collect();
                self.check_group_order(&order)?;
                order
            },
            None => self.names().collect(),
        };

        let mut placed = vec![false; self.num_elements];
        let mut ordering = Vec::with_capacity(self.num_elements);
        for name in order {
            let mask = self.get(name)?;
            if mask.iter().zip(&placed).any(|(&m, &p)| m && p) {
                return Err(MeshError::GroupOverlap(name.to_string()));
            }
            ordering.extend(mask_indices(mask));
            or_assign(&mut placed, mask);
        }
        let ungrouped = placed.iter().filter(|&&p| !p).count();
        ordering.extend(placed.iter().enumerate().filter_map(|(i, &p)| (!p).then_some(i)));

        debug!(
            groups = self.len(),
            elements = self.num_elements,
            ungrouped,
            "defragmented group map"
        );
        Ok(ordering)
    }

    fn check_group_order(&self, order: &[&str]) -> MeshResult<()> {
        let mut missing: Vec<String> = self
            .iter()
            .filter(|(name, mask)| mask.iter().any(|&m| m) && !order.contains(name))
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(MeshError::GroupOrderMissing(missing));
        }

        let unknown: Vec<String> = order
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(MeshError::GroupOrderUnknown(unknown));
        }
        Ok(())
    }
}

impl fmt::Debug for GroupMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(name, mask)| (name, mask_indices(mask))))
            .finish()
    }
}

impl<'a> IntoIterator for &'a GroupMap {
    type Item = (&'a str, &'a [bool]);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a [bool])> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
