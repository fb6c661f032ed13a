//! # Record Store
//!
//! Asset metadata (disk, directory, filename, extension, kind) lives in a record
//! store, separate from the files on the disks. The [`AssetStore`] trait lets the
//! commands work against different backends.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - All records in one `data.json` map of id -> asset
//!   - Written to a temp file and renamed into place
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Ordering Contract
//!
//! The mover calls [`AssetStore::save_asset`] only after every file has been
//! relocated, so a record never points at a location that was abandoned.

use crate::error::Result;
use crate::model::Asset;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for asset records.
pub trait AssetStore {
    /// Save an asset record (create or update)
    fn save_asset(&mut self, asset: &Asset) -> Result<()>;

    /// Get an asset record by ID
    fn get_asset(&self, id: &Uuid) -> Result<Asset>;

    /// List all asset records
    fn list_assets(&self) -> Result<Vec<Asset>>;

    /// Delete an asset record
    fn delete_asset(&mut self, id: &Uuid) -> Result<()>;
}
