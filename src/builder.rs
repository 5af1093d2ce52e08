//! Directory builder for flexible configuration
//!
//! This module provides a builder pattern for creating directories with
//! an optional snapshot path and custom configuration.

use crate::config::Config;
use crate::db::{Directory, DirectoryInner, Tables};
use crate::error::{DirectoryError, Result};
#[cfg(feature = "snapshot")]
use crate::storage::{SnapshotConfig, SnapshotFile};
#[cfg(feature = "snapshot")]
use std::path::PathBuf;

/// Builder for a `Directory` with custom persistence path and settings.
///
/// ```rust
/// use orgdir::{Config, Directory};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = Directory::builder()
///     .config(Config::default().with_max_activity_depth(2))
///     .build()?;
/// assert_eq!(dir.config().max_activity_depth, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DirectoryBuilder {
    #[cfg(feature = "snapshot")]
    snapshot_path: Option<PathBuf>,
    config: Config,
}

impl DirectoryBuilder {
    /// Create a new builder with default in-memory configuration.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "snapshot")]
            snapshot_path: None,
            config: Config::default(),
        }
    }

    /// Set the snapshot path. The file is loaded on build if it exists.
    #[cfg(feature = "snapshot")]
    pub fn snapshot_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Configure for in-memory storage with no persistence.
    pub fn in_memory(mut self) -> Self {
        #[cfg(feature = "snapshot")]
        {
            self.snapshot_path = None;
        }
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the directory, loading the snapshot if one is configured.
    pub fn build(self) -> Result<Directory> {
        self.config
            .validate()
            .map_err(DirectoryError::InvalidConfig)?;

        #[cfg(feature = "snapshot")]
        if let Some(path) = self.snapshot_path {
            let probe = SnapshotFile::new(&path, SnapshotConfig::default());
            let tables: Tables = probe.load()?.unwrap_or_default();
            let mut inner = DirectoryInner::new(tables, self.config);
            inner.attach_snapshot(&path);
            log::debug!(
                "Opened directory at {} with {} organizations",
                path.display(),
                inner.tables.organizations.len()
            );
            return Ok(Directory { inner });
        }

        Ok(Directory {
            inner: DirectoryInner::new(Tables::default(), self.config),
        })
    }
}

impl Default for DirectoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = Config {
            max_activity_depth: 0,
            ..Config::default()
        };
        let result = DirectoryBuilder::new().config(config).build();
        assert!(matches!(result, Err(DirectoryError::InvalidConfig(_))));
    }

    #[cfg(feature = "snapshot")]
    #[test]
    fn test_in_memory_overrides_snapshot_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unused.snapshot");

        let mut directory = DirectoryBuilder::new()
            .snapshot_path(&path)
            .in_memory()
            .build()
            .unwrap();
        directory.create_activity("Food", None).unwrap();
        directory.close().unwrap();

        assert!(!path.exists());
    }
}
