//! # Disk Layer
//!
//! A [`Disk`] is the storage capability set the rest of the crate consumes:
//! exists, read, write, delete and move, all addressed by `/`-separated paths
//! relative to the disk root.
//!
//! ## Implementations
//!
//! - [`fs::FsDisk`]: a directory on the local filesystem
//!   - Writes go to a temporary file first and are renamed into place
//!   - Moves create missing parent directories
//!
//! - [`memory::MemDisk`]: in-memory files for testing
//!   - Can simulate write and move failures
//!
//! ## Move Semantics
//!
//! `move_file` never overwrites. A present destination is
//! [`MediaError::DestinationExists`], an absent source is
//! [`MediaError::SourceMissing`]. Everything else a backend reports is
//! [`MediaError::BackendUnavailable`].
//!
//! Assets name the disk they live on; [`DiskSet`] maps those names to backends.

use crate::error::{MediaError, Result};
use std::collections::BTreeMap;

pub mod fs;
pub mod memory;

pub trait Disk {
    fn exists(&self, path: &str) -> Result<bool>;

    /// Read a whole file. Missing files are [`MediaError::SourceMissing`].
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Create or replace a file.
    fn write(&self, path: &str, contents: &[u8]) -> Result<()>;

    /// Remove a file. Removing a missing file is not an error.
    fn delete(&self, path: &str) -> Result<()>;

    /// Rename `from` to `to` without ever overwriting `to`.
    fn move_file(&self, from: &str, to: &str) -> Result<()>;
}

/// Named disks, looked up by [`crate::model::Asset::disk`].
#[derive(Default)]
pub struct DiskSet {
    disks: BTreeMap<String, Box<dyn Disk>>,
}

impl DiskSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disk<D: Disk + 'static>(mut self, name: &str, disk: D) -> Self {
        self.insert(name, disk);
        self
    }

    pub fn insert<D: Disk + 'static>(&mut self, name: &str, disk: D) {
        self.disks.insert(name.to_string(), Box::new(disk));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Disk> {
        self.disks
            .get(name)
            .map(|d| d.as_ref())
            .ok_or_else(|| MediaError::UnknownDisk(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.disks.keys().map(String::as_str)
    }
}
