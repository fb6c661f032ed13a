use crate::error::{MediaError, Result};
use crate::mover::MissingVariantPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DISK: &str = "local";

/// Configuration for mediavar, stored in `{data dir}/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaConfig {
    /// Disk name -> root directory. Relative roots resolve against the data dir.
    #[serde(default = "default_disks")]
    pub disks: BTreeMap<String, PathBuf>,

    /// Disk used when registering new assets
    #[serde(default = "default_disk")]
    pub default_disk: String,

    /// What a move does with logged variants that have no file
    #[serde(default)]
    pub missing_variant_policy: MissingVariantPolicy,

    /// Skip logging a recipe that is already in an asset's history
    #[serde(default)]
    pub dedupe_log: bool,

    /// Resolve recipe-suffixed variant paths (off: every path is the original's)
    #[serde(default = "default_true")]
    pub manipulation_enabled: bool,
}

fn default_disks() -> BTreeMap<String, PathBuf> {
    let mut disks = BTreeMap::new();
    disks.insert(DEFAULT_DISK.to_string(), PathBuf::from("disks").join(DEFAULT_DISK));
    disks
}

fn default_disk() -> String {
    DEFAULT_DISK.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            disks: default_disks(),
            default_disk: default_disk(),
            missing_variant_policy: MissingVariantPolicy::default(),
            dedupe_log: false,
            manipulation_enabled: true,
        }
    }
}

/// Keys accepted by [`MediaConfig::set`] and [`MediaConfig::get`].
pub const CONFIG_KEYS: &[&str] = &[
    "default-disk",
    "missing-variant-policy",
    "dedupe-log",
    "manipulation-enabled",
];

impl MediaConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MediaError::Io)?;
        let config: MediaConfig =
            serde_json::from_str(&content).map_err(MediaError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MediaError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MediaError::Serialization)?;
        fs::write(config_path, content).map_err(MediaError::Io)?;
        Ok(())
    }

    /// Absolute root for every configured disk.
    pub fn disk_roots(&self, data_dir: &Path) -> BTreeMap<String, PathBuf> {
        self.disks
            .iter()
            .map(|(name, root)| {
                let root = if root.is_absolute() {
                    root.clone()
                } else {
                    data_dir.join(root)
                };
                (name.clone(), root)
            })
            .collect()
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "default-disk" => self.default_disk.clone(),
            "missing-variant-policy" => self.missing_variant_policy.to_string(),
            "dedupe-log" => self.dedupe_log.to_string(),
            "manipulation-enabled" => self.manipulation_enabled.to_string(),
            other => return Err(unknown_key(other)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-disk" => {
                if !self.disks.contains_key(value) {
                    return Err(MediaError::UnknownDisk(value.to_string()));
                }
                self.default_disk = value.to_string();
            }
            "missing-variant-policy" => self.missing_variant_policy = value.parse()?,
            "dedupe-log" => self.dedupe_log = parse_bool(key, value)?,
            "manipulation-enabled" => self.manipulation_enabled = parse_bool(key, value)?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// Add or replace a disk root.
    pub fn set_disk(&mut self, name: &str, root: PathBuf) {
        self.disks.insert(name.to_string(), root);
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(MediaError::InvalidArgument(format!(
            "{} expects true or false, got '{}'",
            key, value
        ))),
    }
}

fn unknown_key(key: &str) -> MediaError {
    MediaError::InvalidArgument(format!(
        "unknown config key: {} (known: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
