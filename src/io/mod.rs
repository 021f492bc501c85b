#[cfg(feature = "obj-io")]
mod obj;

#[cfg(feature = "obj-io")]
pub use obj::{load_obj, load_obj_str, write_obj};

use crate::errors::MeshError;

/// Errors from reading or writing mesh files.
///
/// Format readers sit behind cargo feature flags. When a feature is disabled
/// the corresponding variants are never constructed.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),

    /// The text could not be parsed. Carries the offending line.
    MalformedInput(String),

    /// Faces of unsupported or mixed arity.
    Arity(String),

    /// The parsed data does not form a valid mesh.
    Mesh(MeshError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
            Arity(msg) => f.write_str(msg),
            Mesh(error) => write!(f, "Invalid mesh: {error}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIo(error) => Some(error),
            IoError::Mesh(error) => Some(error),
            IoError::MalformedInput(_) | IoError::Arity(_) => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<MeshError> for IoError {
    fn from(value: MeshError) -> Self {
        Self::Mesh(value)
    }
}
