//! Snapshot-based persistence.
//!
//! A snapshot is the full directory state written as one file: a magic
//! header, a version byte, the write timestamp, then the bincode-encoded
//! tables. Saves go to a temporary sibling file that atomically replaces the
//! previous snapshot.

use crate::error::{DirectoryError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const SNAPSHOT_MAGIC: &[u8] = b"ORGDIR_SNAPSHOT";
const SNAPSHOT_VERSION: u8 = 1;

#[derive(Debug, Clone, Default)]
pub struct SnapshotConfig {
    pub auto_snapshot_ops: Option<usize>,
}

#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
    config: SnapshotConfig,
    ops_since_snapshot: usize,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P, config: SnapshotConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
            ops_since_snapshot: 0,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the stored state; `None` if the file is missing or empty.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        if file.metadata()?.len() == 0 {
            return Ok(None);
        }

        let mut reader = BufReader::new(file);

        let mut magic = vec![0u8; SNAPSHOT_MAGIC.len()];
        reader
            .read_exact(&mut magic)
            .map_err(|_| DirectoryError::InvalidFormat)?;
        if magic != SNAPSHOT_MAGIC {
            return Err(DirectoryError::InvalidFormat);
        }

        let mut version = [0u8; 1];
        reader
            .read_exact(&mut version)
            .map_err(|_| DirectoryError::InvalidFormat)?;
        if version[0] != SNAPSHOT_VERSION {
            return Err(DirectoryError::InvalidFormat);
        }

        let mut timestamp_bytes = [0u8; 12];
        reader
            .read_exact(&mut timestamp_bytes)
            .map_err(|_| DirectoryError::InvalidFormat)?;

        let state = bincode::deserialize_from(&mut reader)?;
        log::debug!("Loaded snapshot from {}", self.path.display());
        Ok(Some(state))
    }

    pub fn save<T: Serialize>(&mut self, state: &T) -> Result<()> {
        let temp_path = self.temp_path();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        let mut writer = BufWriter::new(file);

        writer.write_all(SNAPSHOT_MAGIC)?;
        writer.write_all(&[SNAPSHOT_VERSION])?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        writer.write_all(&timestamp.as_secs().to_le_bytes())?;
        writer.write_all(&timestamp.subsec_nanos().to_le_bytes())?;

        bincode::serialize_into(&mut writer, state)?;

        writer.flush()?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp_path, &self.path)?;
        self.sync_parent_dir()?;

        log::debug!(
            "Wrote snapshot to {} after {} operations",
            self.path.display(),
            self.ops_since_snapshot
        );
        self.ops_since_snapshot = 0;

        Ok(())
    }

    pub fn record_operation(&mut self) {
        self.ops_since_snapshot += 1;
    }

    /// Whether there are operations not yet written to disk.
    pub fn is_dirty(&self) -> bool {
        self.ops_since_snapshot > 0
    }

    pub fn should_snapshot(&self) -> bool {
        if let Some(threshold) = self.config.auto_snapshot_ops {
            self.ops_since_snapshot >= threshold
        } else {
            false
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        if let Some(name) = temp.file_name() {
            let mut new_name = name.to_string_lossy().into_owned();
            new_name.push_str(".tmp");
            temp.set_file_name(new_name);
        }
        temp
    }

    fn sync_parent_dir(&self) -> Result<()> {
        #[cfg(unix)]
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_snapshot_roundtrip() {
        let temp = NamedTempFile::new().unwrap();
        let mut snapshot = SnapshotFile::new(temp.path(), SnapshotConfig::default());

        let mut data = BTreeMap::new();
        data.insert(1u64, "Food".to_string());
        data.insert(2u64, "Meat".to_string());

        snapshot.save(&data).unwrap();

        let loaded: BTreeMap<u64, String> = snapshot.load().unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_auto_snapshot_threshold() {
        let temp = NamedTempFile::new().unwrap();
        let config = SnapshotConfig {
            auto_snapshot_ops: Some(3),
        };
        let mut snapshot = SnapshotFile::new(temp.path(), config);

        assert!(!snapshot.should_snapshot());
        assert!(!snapshot.is_dirty());

        for _ in 0..2 {
            snapshot.record_operation();
            assert!(!snapshot.should_snapshot());
        }

        snapshot.record_operation();
        assert!(snapshot.should_snapshot());

        snapshot.save(&Vec::<u8>::new()).unwrap();
        assert!(!snapshot.should_snapshot());
        assert!(!snapshot.is_dirty());
    }

    #[test]
    fn test_load_missing_and_empty() {
        let temp = NamedTempFile::new().unwrap();
        let snapshot = SnapshotFile::new(temp.path(), SnapshotConfig::default());
        assert!(snapshot.load::<Vec<u8>>().unwrap().is_none());

        let missing = SnapshotFile::new(
            temp.path().with_extension("missing"),
            SnapshotConfig::default(),
        );
        assert!(missing.load::<Vec<u8>>().unwrap().is_none());
    }

    #[test]
    fn test_truncated_header_is_invalid_format() {
        let temp = NamedTempFile::new().unwrap();

        let mut file = File::create(temp.path()).unwrap();
        file.write_all(SNAPSHOT_MAGIC).unwrap();
        file.write_all(&[SNAPSHOT_VERSION, 0, 0]).unwrap();
        file.sync_all().unwrap();
        drop(file);

        let snapshot = SnapshotFile::new(temp.path(), SnapshotConfig::default());
        assert!(matches!(
            snapshot.load::<Vec<u8>>(),
            Err(DirectoryError::InvalidFormat)
        ));

        let mut file = File::create(temp.path()).unwrap();
        file.write_all(SNAPSHOT_MAGIC).unwrap();
        file.sync_all().unwrap();
        drop(file);
        assert!(matches!(
            snapshot.load::<Vec<u8>>(),
            Err(DirectoryError::InvalidFormat)
        ));
    }

    #[test]
    fn test_invalid_magic() {
        let temp = NamedTempFile::new().unwrap();

        let mut file = File::create(temp.path()).unwrap();
        file.write_all(b"NOT_A_SNAPSHOT_FILE").unwrap();
        file.sync_all().unwrap();
        drop(file);

        let snapshot = SnapshotFile::new(temp.path(), SnapshotConfig::default());
        assert!(matches!(
            snapshot.load::<Vec<u8>>(),
            Err(DirectoryError::InvalidFormat)
        ));
    }
}
