//! Core directory implementation.
//!
//! This module defines the `Directory` type. The tree engine, the geospatial
//! engine and the organization façade each add their operations in a
//! submodule.

use crate::config::{Config, DirectoryStats};
use crate::error::{DirectoryError, Result};
#[cfg(feature = "snapshot")]
use crate::storage::{SnapshotConfig, SnapshotFile};
#[cfg(feature = "snapshot")]
use std::path::Path;

mod activity;
mod building;
mod organization;
mod seed;
mod tables;

pub(crate) use tables::Tables;
use tables::Indexes;

/// Embedded directory of organizations, buildings and activities.
///
/// The `Directory` offers:
/// - An activity taxonomy with a maximum nesting depth
/// - Buildings indexed by location for radius and box queries
/// - Organizations read back fully populated with building, phones and activities
/// - Optional snapshot persistence
///
/// Reads take `&self` and writes take `&mut self`; one owner serializes its
/// writes. Wrap the directory in a lock to share it between threads.
///
/// # Examples
///
/// ```rust
/// use orgdir::{Directory, NewOrganization, ProximityQuery};
/// use geo::Point;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut dir = Directory::memory()?;
///
/// let food = dir.create_activity("Food", None)?;
/// let meat = dir.create_activity("Meat", Some(food.id))?;
/// let building = dir.create_building("1 Lenina St", 55.7558, 37.6173)?;
///
/// dir.create_organization(
///     NewOrganization::new("Horns & Hooves", building.id)
///         .with_phones(["2-222-222"])
///         .with_activities([meat.id]),
/// )?;
///
/// // Sub-categories are included when searching by activity name
/// let found = dir.search_organizations_by_activity("Food")?;
/// assert_eq!(found.len(), 1);
///
/// let nearby = dir.organizations_near(&Point::new(37.6173, 55.7558), ProximityQuery::radius(500.0))?;
/// assert_eq!(nearby[0].building.address, "1 Lenina St");
/// # Ok(())
/// # }
/// ```
pub struct Directory {
    pub(crate) inner: DirectoryInner,
}

pub(crate) struct DirectoryInner {
    pub tables: Tables,
    pub indexes: Indexes,
    #[cfg(feature = "snapshot")]
    pub snapshot: Option<SnapshotFile>,
    pub closed: bool,
    pub operations_count: u64,
    pub config: Config,
}

impl Directory {
    /// Opens a directory backed by a snapshot file, creating it on first save.
    ///
    /// An existing snapshot is loaded and every index is rebuilt from it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orgdir::Directory;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let path = std::env::temp_dir().join("orgdir_open_demo.snapshot");
    /// # let _ = std::fs::remove_file(&path);
    /// {
    ///     let mut dir = Directory::open(&path)?;
    ///     dir.create_activity("Cars", None)?;
    ///     dir.close()?;
    /// }
    ///
    /// let dir = Directory::open(&path)?;
    /// assert!(dir.find_activity_by_name("Cars")?.is_some());
    /// # std::fs::remove_file(path)?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "snapshot")]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, Config::default())
    }

    #[cfg(feature = "snapshot")]
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        Self::builder().snapshot_path(path.as_ref()).config(config).build()
    }

    /// Creates an empty in-memory directory.
    pub fn memory() -> Result<Self> {
        Self::memory_with_config(Config::default())
    }

    pub fn memory_with_config(config: Config) -> Result<Self> {
        Self::builder().in_memory().config(config).build()
    }

    /// Create a builder for advanced configuration.
    pub fn builder() -> crate::builder::DirectoryBuilder {
        crate::builder::DirectoryBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Row counts and the number of writes since open.
    pub fn stats(&self) -> DirectoryStats {
        let tables = &self.inner.tables;
        DirectoryStats {
            activities: tables.activities.len(),
            buildings: tables.buildings.len(),
            organizations: tables.organizations.len(),
            phones: tables.phones.len(),
            activity_links: tables.organization_activities.len(),
            operations_count: self.inner.operations_count,
        }
    }

    /// Write a snapshot now, if the directory is file-backed.
    pub fn sync(&mut self) -> Result<()> {
        self.inner.ensure_open()?;
        self.inner.write_snapshot()
    }

    /// Gracefully close the directory.
    ///
    /// Pending writes are flushed to the snapshot; afterwards every
    /// operation returns `DatabaseClosed`. If the flush fails the directory
    /// stays open so `close` or `sync` can be retried.
    pub fn close(&mut self) -> Result<()> {
        self.inner.ensure_open()?;
        self.inner.flush_pending()?;
        self.inner.closed = true;
        Ok(())
    }
}

impl DirectoryInner {
    pub(crate) fn new(tables: Tables, config: Config) -> Self {
        let indexes = Indexes::rebuild(&tables);
        Self {
            tables,
            indexes,
            #[cfg(feature = "snapshot")]
            snapshot: None,
            closed: false,
            operations_count: 0,
            config,
        }
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(DirectoryError::DatabaseClosed);
        }
        Ok(())
    }

    #[cfg(feature = "snapshot")]
    pub(crate) fn attach_snapshot(&mut self, path: &Path) {
        let config = SnapshotConfig {
            auto_snapshot_ops: self.config.snapshot_auto_ops,
        };
        self.snapshot = Some(SnapshotFile::new(path, config));
    }

    /// Bookkeeping after a committed write.
    ///
    /// A failed auto-snapshot does not undo the write: it is logged and the
    /// snapshot stays dirty, so the next `sync`, `close` or drop retries it.
    pub(crate) fn record_write(&mut self) {
        self.operations_count += 1;

        #[cfg(feature = "snapshot")]
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.record_operation();
            if snapshot.should_snapshot()
                && let Err(e) = snapshot.save(&self.tables)
            {
                log::warn!("Auto-snapshot failed, keeping changes pending: {}", e);
            }
        }
    }

    fn write_snapshot(&mut self) -> Result<()> {
        #[cfg(feature = "snapshot")]
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.save(&self.tables)?;
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        #[cfg(feature = "snapshot")]
        if let Some(snapshot) = self.snapshot.as_mut()
            && snapshot.is_dirty()
        {
            snapshot.save(&self.tables)?;
        }
        Ok(())
    }
}

/// Flushes pending writes on drop (best effort; errors are logged).
impl Drop for Directory {
    fn drop(&mut self) {
        if self.inner.closed {
            return;
        }

        if let Err(e) = self.inner.flush_pending() {
            log::warn!("Failed to flush directory snapshot on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_close_prevents_operations() {
        let mut dir = Directory::memory().unwrap();
        dir.create_activity("Food", None).unwrap();

        dir.close().unwrap();

        assert!(matches!(
            dir.create_activity("Cars", None),
            Err(DirectoryError::DatabaseClosed)
        ));
        assert!(dir.find_activity_by_name("Food").is_err());
        assert!(dir.close().is_err());
    }

    #[test]
    fn test_stats_count_rows_and_writes() {
        let mut dir = Directory::memory().unwrap();
        dir.seed_demo().unwrap();

        let stats = dir.stats();
        assert_eq!(stats.activities, 7);
        assert_eq!(stats.buildings, 2);
        assert_eq!(stats.organizations, 3);
        assert_eq!(stats.phones, 5);
        assert_eq!(stats.activity_links, 4);
        assert_eq!(stats.operations_count, 12);
    }

    #[cfg(feature = "snapshot")]
    #[test]
    fn test_failed_auto_snapshot_keeps_write_and_stays_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let path = missing.join("auto.snapshot");

        let config = Config::default().with_snapshot_auto_ops(1);
        let mut directory = Directory::open_with_config(&path, config).unwrap();

        let food = directory.create_activity("Food", None).unwrap();
        assert_eq!(directory.activities().unwrap(), vec![food.clone()]);
        assert_eq!(directory.stats().operations_count, 1);
        assert!(matches!(directory.sync(), Err(DirectoryError::Io(_))));

        std::fs::create_dir(&missing).unwrap();
        directory.sync().unwrap();
        drop(directory);

        let reopened = Directory::open(&path).unwrap();
        assert_eq!(reopened.activities().unwrap(), vec![food]);
    }

    #[cfg(feature = "snapshot")]
    #[test]
    fn test_failed_close_can_be_retried() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let path = missing.join("close.snapshot");

        let mut directory = Directory::open(&path).unwrap();
        directory.create_building("1 Lenina St", 55.7558, 37.6173).unwrap();

        assert!(matches!(directory.close(), Err(DirectoryError::Io(_))));
        assert_eq!(directory.buildings().unwrap().len(), 1);

        std::fs::create_dir(&missing).unwrap();
        directory.close().unwrap();
        assert!(matches!(
            directory.close(),
            Err(DirectoryError::DatabaseClosed)
        ));

        let reopened = Directory::open(&path).unwrap();
        assert_eq!(reopened.buildings().unwrap().len(), 1);
    }

    #[cfg(feature = "snapshot")]
    #[test]
    fn test_drop_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drop.snapshot");

        {
            let mut directory = Directory::open(&path).unwrap();
            directory.create_building("1 Lenina St", 55.7558, 37.6173).unwrap();
        }

        let directory = Directory::open(&path).unwrap();
        assert_eq!(directory.buildings().unwrap().len(), 1);
    }
}
