use super::Disk;
use crate::error::{MediaError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A disk rooted at a local directory.
pub struct FsDisk {
    root: PathBuf,
}

impl FsDisk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a disk-relative path under the root, refusing anything that escapes it.
    pub fn full_path(&self, path: &str) -> Result<PathBuf> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(MediaError::InvalidArgument("empty disk path".to_string()));
        }
        let mut full = self.root.clone();
        for segment in trimmed.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(MediaError::InvalidArgument(format!(
                    "invalid disk path: {}",
                    path
                )));
            }
            full.push(segment);
        }
        Ok(full)
    }

    fn ensure_parent(&self, full: &Path, path: &str) -> Result<()> {
        if let Some(parent) = full.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| MediaError::backend(path, e))?;
            }
        }
        Ok(())
    }
}

impl Disk for FsDisk {
    fn exists(&self, path: &str) -> Result<bool> {
        let full = self.full_path(path)?;
        full.try_exists().map_err(|e| MediaError::backend(path, e))
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.full_path(path)?;
        fs::read(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MediaError::SourceMissing(path.to_string()),
            _ => MediaError::backend(path, e),
        })
    }

    fn write(&self, path: &str, contents: &[u8]) -> Result<()> {
        let full = self.full_path(path)?;
        self.ensure_parent(&full, path)?;

        // Atomic write: temp file in the same directory, then rename over the target
        let tmp_name = format!(".mediavar-{}.tmp", Uuid::new_v4());
        let tmp = full.with_file_name(tmp_name);
        fs::write(&tmp, contents).map_err(|e| MediaError::backend(path, e))?;
        if let Err(e) = fs::rename(&tmp, &full) {
            let _ = fs::remove_file(&tmp);
            return Err(MediaError::backend(path, e));
        }
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let full = self.full_path(path)?;
        match fs::remove_file(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::backend(path, e)),
        }
    }

    fn move_file(&self, from: &str, to: &str) -> Result<()> {
        let source = self.full_path(from)?;
        let target = self.full_path(to)?;

        if !source.is_file() {
            return Err(MediaError::SourceMissing(from.to_string()));
        }
        if target.try_exists().map_err(|e| MediaError::backend(to, e))? {
            return Err(MediaError::DestinationExists(to.to_string()));
        }

        self.ensure_parent(&target, to)?;
        fs::rename(&source, &target).map_err(|e| MediaError::backend(from, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FsDisk) {
        let dir = TempDir::new().unwrap();
        let disk = FsDisk::new(dir.path());
        (dir, disk)
    }

    #[test]
    fn write_read_delete() {
        let (_dir, disk) = setup();
        disk.write("foo/bar.jpg", b"pixels").unwrap();
        assert!(disk.exists("foo/bar.jpg").unwrap());
        assert_eq!(disk.read("foo/bar.jpg").unwrap(), b"pixels");

        disk.delete("foo/bar.jpg").unwrap();
        assert!(!disk.exists("foo/bar.jpg").unwrap());
        disk.delete("foo/bar.jpg").unwrap();
    }

    #[test]
    fn write_leaves_no_tmp_files() {
        let (dir, disk) = setup();
        disk.write("a/b.txt", b"x").unwrap();
        disk.write("a/b.txt", b"y").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path().join("a"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["b.txt".to_string()]);
        assert_eq!(disk.read("a/b.txt").unwrap(), b"y");
    }

    #[test]
    fn read_missing_is_source_missing() {
        let (_dir, disk) = setup();
        assert!(matches!(
            disk.read("nope.jpg"),
            Err(MediaError::SourceMissing(_))
        ));
    }

    #[test]
    fn move_creates_directories() {
        let (dir, disk) = setup();
        disk.write("foo/bar.jpg", b"1").unwrap();
        disk.move_file("foo/bar.jpg", "alpha/beta/baz.jpg").unwrap();

        assert!(!dir.path().join("foo/bar.jpg").exists());
        assert!(dir.path().join("alpha/beta/baz.jpg").exists());
    }

    #[test]
    fn move_refuses_to_overwrite() {
        let (_dir, disk) = setup();
        disk.write("a.jpg", b"a").unwrap();
        disk.write("b.jpg", b"b").unwrap();

        let err = disk.move_file("a.jpg", "b.jpg").unwrap_err();
        assert!(matches!(err, MediaError::DestinationExists(p) if p == "b.jpg"));
        assert_eq!(disk.read("a.jpg").unwrap(), b"a");
        assert_eq!(disk.read("b.jpg").unwrap(), b"b");
    }

    #[test]
    fn move_missing_source() {
        let (_dir, disk) = setup();
        assert!(matches!(
            disk.move_file("a.jpg", "b.jpg"),
            Err(MediaError::SourceMissing(_))
        ));
    }

    #[test]
    fn paths_cannot_escape_root() {
        let (_dir, disk) = setup();
        assert!(matches!(
            disk.full_path("../etc/passwd"),
            Err(MediaError::InvalidArgument(_))
        ));
        assert!(matches!(
            disk.full_path("a//b"),
            Err(MediaError::InvalidArgument(_))
        ));
        assert!(disk.full_path("/a/b.jpg").is_ok());
    }

    #[test]
    fn variant_names_are_valid_file_names() {
        let (_dir, disk) = setup();
        let path = "foo/bar-colorize+250,250,250|resize+250,250.jpg";
        disk.write(path, b"v").unwrap();
        assert!(disk.exists(path).unwrap());
    }
}
