//! Directory configuration and statistics.
//!
//! `Config` is plain serde data so it can be loaded from JSON (or TOML with the
//! `toml` feature) alongside the rest of an application's settings.
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Maximum activity nesting, root included.
pub const DEFAULT_MAX_ACTIVITY_DEPTH: usize = 3;

/// Directory configuration.
///
/// # Example
///
/// ```rust
/// use orgdir::Config;
///
/// let config = Config::default();
/// assert_eq!(config.max_activity_depth, 3);
///
/// let json = r#"{
///     "max_activity_depth": 3,
///     "snapshot_auto_ops": 100
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.snapshot_auto_ops, Some(100));
/// assert!(config.validate_coordinates);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Deepest allowed activity chain, counting the root as depth 1
    #[serde(default = "Config::default_max_activity_depth")]
    pub max_activity_depth: usize,

    /// Reject building locations and query centers outside WGS84 ranges
    #[serde(default = "Config::default_validate_coordinates")]
    pub validate_coordinates: bool,

    /// Write a snapshot after this many mutations (None = only on sync/close)
    #[serde(default)]
    pub snapshot_auto_ops: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_activity_depth: Self::default_max_activity_depth(),
            validate_coordinates: Self::default_validate_coordinates(),
            snapshot_auto_ops: None,
        }
    }
}

impl Config {
    const fn default_max_activity_depth() -> usize {
        DEFAULT_MAX_ACTIVITY_DEPTH
    }

    const fn default_validate_coordinates() -> bool {
        true
    }

    pub fn with_max_activity_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "Max activity depth must be greater than zero");
        if depth > 16 {
            log::warn!(
                "Max activity depth of {} is unusually deep for a category taxonomy",
                depth
            );
        }
        self.max_activity_depth = depth;
        self
    }

    pub fn with_coordinate_validation(mut self, enabled: bool) -> Self {
        self.validate_coordinates = enabled;
        self
    }

    /// Snapshot automatically every `ops` mutations.
    pub fn with_snapshot_auto_ops(mut self, ops: usize) -> Self {
        assert!(ops > 0, "Snapshot interval must be greater than zero");
        self.snapshot_auto_ops = Some(ops);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_activity_depth == 0 {
            return Err("Max activity depth must be greater than zero".to_string());
        }

        if let Some(ops) = self.snapshot_auto_ops
            && ops == 0
        {
            return Err("Snapshot interval must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Row counts and mutation counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub activities: usize,
    pub buildings: usize,
    pub organizations: usize,
    pub phones: usize,
    pub activity_links: usize,
    /// Mutations since the directory was opened
    pub operations_count: u64,
}
