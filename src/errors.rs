//! Validation errors

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// All the possible validation issues we might encounter while building,
/// selecting from or reindexing a mesh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MeshError {
    /// (WrongShape) A flat buffer or table does not have the expected shape
    #[error("Expected {what} to have shape {expected}, got {actual}")]
    WrongShape {
        what: &'static str,
        expected: String,
        actual: String,
    },

    /// (UnsupportedArity) Faces must have 3 or 4 vertices
    #[error("Expected 3 or 4 vertices per face, got {0}")]
    UnsupportedArity(usize),

    /// (MixedArity) All faces of a mesh must share one arity
    #[error("Expected every face to have {expected} vertices, face {face} has {found}")]
    MixedArity {
        expected: usize,
        found: usize,
        face: usize,
    },

    /// (IndexOutOfRange) An index refers past the end of its element array
    #[error("Expected indices in {what} to be less than {limit}, got {index}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        limit: usize,
    },

    /// (ElementOutOfRange) A group references an element past `num_elements`
    #[error("Element indices should be less than {limit}, got {index}")]
    ElementOutOfRange { index: usize, limit: usize },

    /// (InvalidAxis) Axis-relative predicates only accept x, y or z
    #[error("Expected dim to be 0, 1, or 2, got {0}")]
    InvalidAxis(usize),

    /// (MaskLength) A boolean mask does not cover its element array
    #[error("Expected {what} mask of length {expected}, got {actual}")]
    MaskLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// (UnknownGroup) Lookup of a single group that does not exist
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// (UnknownGroups) Every unknown name of a multi-group request
    #[error("Unknown groups: {}", .0.join(", "))]
    UnknownGroups(Vec<String>),

    /// (DuplicateGroup) Group names must be unique
    #[error("Duplicate group: {0}")]
    DuplicateGroup(String),

    /// (MissingFaceGroups) A group-based operation on a mesh without groups
    #[error("Mesh has no face groups")]
    MissingFaceGroups,

    /// (GroupOrderMissing) A defragmentation order that omits known groups
    #[error("group_order is missing groups: {}", .0.join(", "))]
    GroupOrderMissing(Vec<String>),

    /// (GroupOrderUnknown) A defragmentation order that names unknown groups
    #[error("group_order contains unknown groups: {}", .0.join(", "))]
    GroupOrderUnknown(Vec<String>),

    /// (GroupOverlap) Defragmentation requires pairwise disjoint groups
    #[error("Group \"{0}\" overlaps with previous groups")]
    GroupOverlap(String),

    /// (DegeneratePlane) A plane needs a non-zero normal
    #[error("Expected a plane with a non-zero normal")]
    DegeneratePlane,

    /// (DegenerateOrientation) Reorienting needs non-zero, non-colinear
    /// `up` and `look` vectors
    #[error("Expected up and look to be non-zero and not colinear")]
    DegenerateOrientation,

    /// (UnknownUnit) A length unit we cannot convert
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// (NotAPermutation) A reordering must be a bijection over `0..len`
    #[error("Expected {what} indices to be unique and span the full range 0..{len}")]
    NotAPermutation { what: &'static str, len: usize },
}
