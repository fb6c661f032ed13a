//! Asset records.
//!
//! An [`Asset`] is one original file on a named disk. Its variants are not
//! stored here; their paths are derived from the asset's location and a recipe.
//! Only [`AssetKind::Image`] assets have recipe-suffixed variant paths.

use crate::paths;
use crate::recipe::Recipe;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Vector,
    Other,
}

impl AssetKind {
    /// Guess the kind from a file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "tif" | "tiff" => AssetKind::Image,
            "svg" | "eps" | "ai" => AssetKind::Vector,
            _ => AssetKind::Other,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetKind::Image => "image",
            AssetKind::Vector => "vector",
            AssetKind::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(AssetKind::Image),
            "vector" => Ok(AssetKind::Vector),
            "other" => Ok(AssetKind::Other),
            other => Err(format!("unknown asset kind: {}", other)),
        }
    }
}

/// One logical media item on a disk.
///
/// `active_recipe` is in-memory only: it selects which derived variant
/// [`Asset::disk_path`] points at and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub disk: String,
    /// Normalized, without leading or trailing separators.
    pub directory: String,
    /// Base filename without extension.
    pub filename: String,
    pub extension: String,
    pub kind: AssetKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub active_recipe: Recipe,
}

impl Asset {
    pub fn new(disk: &str, directory: &str, filename: &str, extension: &str, kind: AssetKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            disk: disk.to_string(),
            directory: paths::normalize_directory(directory),
            filename: filename.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
            kind,
            created_at: now,
            updated_at: now,
            active_recipe: Recipe::new(),
        }
    }

    /// Build an asset from a disk-relative path such as `foo/bar.jpg`.
    pub fn from_disk_path(disk: &str, path: &str) -> Self {
        let path = paths::normalize_directory(path);
        let (directory, basename) = match path.rsplit_once('/') {
            Some((dir, base)) => (dir, base),
            None => ("", path.as_str()),
        };
        let (filename, extension) = match basename.rsplit_once('.') {
            Some((name, ext)) if !name.is_empty() => (name, ext),
            _ => (basename, ""),
        };
        Self::new(
            disk,
            directory,
            filename,
            extension,
            AssetKind::from_extension(extension),
        )
    }

    pub fn is_image(&self) -> bool {
        self.kind == AssetKind::Image
    }

    /// `{filename}.{extension}`
    pub fn basename(&self) -> String {
        paths::basename(&self.filename, &self.extension)
    }

    /// Path of the original file, ignoring any active recipe.
    pub fn plain_path(&self) -> String {
        paths::resolve_path(&self.directory, &self.filename, &Recipe::new(), &self.extension, false)
    }

    /// Path of the variant produced by `recipe`. Only images have variants.
    pub fn variant_path(&self, recipe: &Recipe, manipulation_enabled: bool) -> String {
        paths::resolve_path(
            &self.directory,
            &self.filename,
            recipe,
            &self.extension,
            manipulation_enabled && self.is_image(),
        )
    }

    /// Path selected by the active recipe.
    pub fn disk_path(&self, manipulation_enabled: bool) -> String {
        self.variant_path(&self.active_recipe, manipulation_enabled)
    }

    /// Sidecar history document, always next to the plain path.
    pub fn log_path(&self) -> String {
        paths::resolve_log_path(&self.directory, &self.filename, &self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Asset {
        Asset::new("tmp", "foo", "bar", "jpg", AssetKind::Image)
    }

    #[test]
    fn disk_path_follows_active_recipe() {
        let mut asset = image();
        assert_eq!(asset.disk_path(true), "foo/bar.jpg");

        asset.active_recipe.insert("resize", vec![250.into(), 250.into()]).unwrap();
        assert_eq!(asset.disk_path(true), "foo/bar-resize+250,250.jpg");

        asset
            .active_recipe
            .insert("colorize", vec!["0".into(), "0".into(), "0".into()])
            .unwrap();
        assert_eq!(asset.disk_path(true), "foo/bar-colorize+0,0,0|resize+250,250.jpg");
    }

    #[test]
    fn disabled_manipulation_uses_plain_path() {
        let mut asset = image();
        asset.active_recipe.insert("resize", vec![250.into(), 250.into()]).unwrap();
        assert_eq!(asset.disk_path(false), "foo/bar.jpg");
    }

    #[test]
    fn non_images_never_have_variants() {
        let mut asset = image();
        asset.kind = AssetKind::Vector;
        asset.active_recipe.insert("resize", vec![250.into(), 250.into()]).unwrap();
        assert_eq!(asset.disk_path(true), "foo/bar.jpg");
    }

    #[test]
    fn log_path_ignores_recipe() {
        let mut asset = image();
        asset.active_recipe.insert("resize", vec![250.into(), 250.into()]).unwrap();
        assert_eq!(asset.log_path(), "foo/bar.jpg.json");
    }

    #[test]
    fn from_disk_path_splits_components() {
        let asset = Asset::from_disk_path("local", "/foo/bar/baz.png/");
        assert_eq!(asset.directory, "foo/bar");
        assert_eq!(asset.filename, "baz");
        assert_eq!(asset.extension, "png");
        assert_eq!(asset.kind, AssetKind::Image);

        let root = Asset::from_disk_path("local", "notes.txt");
        assert_eq!(root.directory, "");
        assert_eq!(root.plain_path(), "notes.txt");
        assert_eq!(root.kind, AssetKind::Other);
    }

    #[test]
    fn active_recipe_is_not_persisted() {
        let mut asset = image();
        asset.active_recipe.insert("resize", vec![250.into()]).unwrap();
        let json = serde_json::to_string(&asset).unwrap();
        assert!(!json.contains("resize"));

        let back: Asset = serde_json::from_str(&json).unwrap();
        assert!(back.active_recipe.is_empty());
        assert_eq!(back.plain_path(), "foo/bar.jpg");
    }
}
