//! Producing variant files.
//!
//! The pixel work belongs to an external engine behind [`Transformer`]. This
//! module decides whether a variant needs producing, writes it at its canonical
//! path and records the recipe in the manipulation log, which is what later lets
//! a move find the file again.

use crate::disk::Disk;
use crate::error::Result;
use crate::manipulation_log::ManipulationLog;
use crate::model::Asset;
use crate::recipe::Recipe;
use tracing::debug;

/// External transformation engine.
pub trait Transformer {
    fn transform(&self, source: &[u8], recipe: &Recipe) -> Result<Vec<u8>>;
}

impl<F> Transformer for F
where
    F: Fn(&[u8], &Recipe) -> Result<Vec<u8>>,
{
    fn transform(&self, source: &[u8], recipe: &Recipe) -> Result<Vec<u8>> {
        self(source, recipe)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// The variant was produced and logged.
    Written(String),
    /// A file is already at the variant path. Its recipe is logged if it was not.
    AlreadyPresent(String),
    /// Not an image, manipulation disabled, or an empty recipe.
    NotApplicable,
}

pub struct Materializer<'a> {
    disk: &'a dyn Disk,
    manipulation_enabled: bool,
    dedupe: bool,
}

impl<'a> Materializer<'a> {
    pub fn new(disk: &'a dyn Disk) -> Self {
        Self {
            disk,
            manipulation_enabled: true,
            dedupe: false,
        }
    }

    pub fn with_manipulation(mut self, enabled: bool) -> Self {
        self.manipulation_enabled = enabled;
        self
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn apply(
        &self,
        asset: &Asset,
        recipe: &Recipe,
        transformer: &dyn Transformer,
    ) -> Result<Materialized> {
        if !self.manipulation_enabled || !asset.is_image() || recipe.is_empty() {
            return Ok(Materialized::NotApplicable);
        }

        let log = ManipulationLog::new(self.disk).with_dedupe(self.dedupe);
        let target = asset.variant_path(recipe, true);
        if self.disk.exists(&target)? {
            // The file is only moved with the asset if its recipe is logged.
            if !log.load(asset)?.contains(recipe) {
                log.append(asset, recipe)?;
                debug!(asset = %asset.id, variant = %target, "logged unrecorded variant");
            }
            return Ok(Materialized::AlreadyPresent(target));
        }

        let source = self.disk.read(&asset.plain_path())?;
        let output = transformer.transform(&source, recipe)?;
        self.disk.write(&target, &output)?;
        log.append(asset, recipe)?;
        debug!(asset = %asset.id, variant = %target, "materialized variant");

        Ok(Materialized::Written(target))
    }

    /// Apply each recipe in turn, e.g. the set registered for new uploads.
    pub fn apply_all(
        &self,
        asset: &Asset,
        recipes: &[Recipe],
        transformer: &dyn Transformer,
    ) -> Result<Vec<Materialized>> {
        recipes
            .iter()
            .map(|recipe| self.apply(asset, recipe, transformer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::memory::MemDisk;
    use crate::error::MediaError;
    use crate::model::AssetKind;
    use std::cell::Cell;

    fn tagging(source: &[u8], recipe: &Recipe) -> Result<Vec<u8>> {
        let mut out = source.to_vec();
        out.extend_from_slice(recipe.canonical().as_bytes());
        Ok(out)
    }

    fn setup() -> (MemDisk, Asset) {
        let disk = MemDisk::new();
        let asset = Asset::new("tmp", "foo", "bar", "jpg", AssetKind::Image);
        disk.write("foo/bar.jpg", b"img:").unwrap();
        (disk, asset)
    }

    fn resize() -> Recipe {
        Recipe::new().with("resize", [250, 250]).unwrap()
    }

    #[test]
    fn writes_variant_and_logs_it() {
        let (disk, asset) = setup();
        let outcome = Materializer::new(&disk)
            .apply(&asset, &resize(), &tagging)
            .unwrap();

        assert_eq!(
            outcome,
            Materialized::Written("foo/bar-resize+250,250.jpg".to_string())
        );
        assert_eq!(
            disk.read("foo/bar-resize+250,250.jpg").unwrap(),
            b"img:resize+250,250"
        );
        assert_eq!(ManipulationLog::new(&disk).load(&asset).unwrap(), vec![resize()]);
    }

    #[test]
    fn existing_variant_is_not_redone() {
        let (disk, asset) = setup();
        let calls = Cell::new(0);
        let counting = |source: &[u8], recipe: &Recipe| {
            calls.set(calls.get() + 1);
            tagging(source, recipe)
        };

        let materializer = Materializer::new(&disk);
        materializer.apply(&asset, &resize(), &counting).unwrap();
        let second = materializer.apply(&asset, &resize(), &counting).unwrap();

        assert!(matches!(second, Materialized::AlreadyPresent(_)));
        assert_eq!(calls.get(), 1);
        assert_eq!(ManipulationLog::new(&disk).load(&asset).unwrap().len(), 1);
    }

    #[test]
    fn unlogged_existing_variant_gets_logged() {
        let (disk, asset) = setup();
        disk.write("foo/bar-resize+250,250.jpg", b"made elsewhere").unwrap();

        let outcome = Materializer::new(&disk)
            .apply(&asset, &resize(), &tagging)
            .unwrap();

        assert!(matches!(outcome, Materialized::AlreadyPresent(_)));
        assert_eq!(
            disk.read("foo/bar-resize+250,250.jpg").unwrap(),
            b"made elsewhere"
        );
        assert_eq!(ManipulationLog::new(&disk).load(&asset).unwrap(), vec![resize()]);
    }

    #[test]
    fn not_applicable_cases() {
        let (disk, mut asset) = setup();
        let m = Materializer::new(&disk);
        assert_eq!(
            m.apply(&asset, &Recipe::new(), &tagging).unwrap(),
            Materialized::NotApplicable
        );

        let disabled = Materializer::new(&disk).with_manipulation(false);
        assert_eq!(
            disabled.apply(&asset, &resize(), &tagging).unwrap(),
            Materialized::NotApplicable
        );

        asset.kind = AssetKind::Vector;
        assert_eq!(
            m.apply(&asset, &resize(), &tagging).unwrap(),
            Materialized::NotApplicable
        );
        assert_eq!(disk.paths(), vec!["foo/bar.jpg".to_string()]);
    }

    #[test]
    fn missing_original_is_reported() {
        let disk = MemDisk::new();
        let asset = Asset::new("tmp", "foo", "bar", "jpg", AssetKind::Image);
        let err = Materializer::new(&disk)
            .apply(&asset, &resize(), &tagging)
            .unwrap_err();
        assert!(matches!(err, MediaError::SourceMissing(_)));
    }

    #[test]
    fn engine_failure_logs_nothing() {
        let (disk, asset) = setup();
        let failing =
            |_: &[u8], _: &Recipe| -> Result<Vec<u8>> { Err(MediaError::Api("engine down".into())) };
        assert!(Materializer::new(&disk)
            .apply(&asset, &resize(), &failing)
            .is_err());
        assert!(!disk.exists("foo/bar.jpg.json").unwrap());
    }

    #[test]
    fn apply_all_runs_in_order() {
        let (disk, asset) = setup();
        let recipes = vec![resize(), resize().with("colorize", [1, 2, 3]).unwrap()];
        let outcomes = Materializer::new(&disk)
            .apply_all(&asset, &recipes, &tagging)
            .unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(ManipulationLog::new(&disk).load(&asset).unwrap(), recipes);
    }
}
