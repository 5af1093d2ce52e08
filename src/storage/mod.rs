//! Persistence for directory tables.

#[cfg(feature = "snapshot")]
mod snapshot;

#[cfg(feature = "snapshot")]
pub use snapshot::{SnapshotConfig, SnapshotFile};
