//! Error types for directory operations.

use std::fmt;
use thiserror::Error;

/// Kind of row an id refers to, used in `NotFound` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Activity,
    Building,
    Organization,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Activity => "activity",
            EntityKind::Building => "building",
            EntityKind::Organization => "organization",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Requested id has no matching row
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    /// Input rejected by a structural rule (depth, coordinates, parameters)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Query ran but matched nothing; only raised through `RequireNonEmpty`
    #[error("no results: {0}")]
    EmptyResult(String),

    #[error("directory is closed")]
    DatabaseClosed,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid snapshot format")]
    InvalidFormat,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DirectoryError {
    pub(crate) fn not_found(entity: EntityKind, id: impl Into<u64>) -> Self {
        DirectoryError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DirectoryError::Validation(_))
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::Serialization(err.to_string())
    }
}

#[cfg(feature = "snapshot")]
impl From<bincode::Error> for DirectoryError {
    fn from(err: bincode::Error) -> Self {
        DirectoryError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Turns an empty query result into `DirectoryError::EmptyResult`.
///
/// Engine queries return empty vectors for "no matches"; callers that want
/// to surface that as a not-found style response opt in through this trait.
///
/// ```rust
/// use orgdir::{Directory, RequireNonEmpty};
///
/// let dir = Directory::memory()?;
/// let err = dir
///     .search_organizations_by_activity("Food")?
///     .require_non_empty("organizations for activity Food")
///     .unwrap_err();
/// assert!(matches!(err, orgdir::DirectoryError::EmptyResult(_)));
/// # Ok::<(), orgdir::DirectoryError>(())
/// ```
pub trait RequireNonEmpty: Sized {
    fn require_non_empty(self, what: &str) -> Result<Self>;
}

impl<T> RequireNonEmpty for Vec<T> {
    fn require_non_empty(self, what: &str) -> Result<Self> {
        if self.is_empty() {
            Err(DirectoryError::EmptyResult(what.to_string()))
        } else {
            Ok(self)
        }
    }
}
