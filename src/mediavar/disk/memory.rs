use super::Disk;
use crate::error::{MediaError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory disk for testing.
///
/// Uses `RefCell` for interior mutability since the crate is single-threaded,
/// which lets the `Disk` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemDisk {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    simulate_write_error: RefCell<bool>,
    failing_move_targets: RefCell<Vec<String>>,
}

impl MemDisk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make any move whose destination is `path` fail as if the backend went away.
    pub fn fail_moves_to(&self, path: &str) {
        self.failing_move_targets.borrow_mut().push(path.to_string());
    }

    /// Every stored path, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    fn key(path: &str) -> String {
        path.trim_matches('/').to_string()
    }
}

impl Disk for MemDisk {
    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.files.borrow().contains_key(&Self::key(path)))
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .borrow()
            .get(&Self::key(path))
            .cloned()
            .ok_or_else(|| MediaError::SourceMissing(path.to_string()))
    }

    fn write(&self, path: &str, contents: &[u8]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(MediaError::BackendUnavailable(
                "Simulated write error".to_string(),
            ));
        }
        self.files
            .borrow_mut()
            .insert(Self::key(path), contents.to_vec());
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        self.files.borrow_mut().remove(&Self::key(path));
        Ok(())
    }

    fn move_file(&self, from: &str, to: &str) -> Result<()> {
        let (from, to) = (Self::key(from), Self::key(to));
        if self.failing_move_targets.borrow().contains(&to) {
            return Err(MediaError::BackendUnavailable(format!(
                "Simulated move error: {}",
                to
            )));
        }

        let mut files = self.files.borrow_mut();
        if files.contains_key(&to) {
            return Err(MediaError::DestinationExists(to));
        }
        let contents = files
            .remove(&from)
            .ok_or(MediaError::SourceMissing(from))?;
        files.insert(to, contents);
        Ok(())
    }
}
