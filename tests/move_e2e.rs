use mediavar::api::{MediaApi, MediaPaths};
use mediavar::canonical;
use mediavar::config::MediaConfig;
use mediavar::disk::fs::FsDisk;
use mediavar::disk::DiskSet;
use mediavar::error::{MediaError, Result};
use mediavar::recipe::Recipe;
use mediavar::store::fs::FileStore;
use mediavar::store::AssetStore;
use std::fs;
use std::path::Path;

fn tag(source: &[u8], recipe: &Recipe) -> Result<Vec<u8>> {
    let mut out = source.to_vec();
    out.extend_from_slice(recipe.canonical().as_bytes());
    Ok(out)
}

fn api(home: &Path) -> MediaApi<FileStore> {
    let config = MediaConfig::default();
    let mut disks = DiskSet::new();
    for (name, root) in config.disk_roots(home) {
        disks.insert(&name, FsDisk::new(root));
    }
    MediaApi::new(
        FileStore::new(home),
        disks,
        config,
        MediaPaths {
            data_dir: home.to_path_buf(),
        },
    )
}

#[test]
fn move_and_rename_with_variants_on_real_disk() {
    let home = tempfile::tempdir().unwrap();
    let root = home.path().join("disks/local");
    fs::create_dir_all(root.join("foo")).unwrap();
    fs::write(root.join("foo/bar.jpg"), b"pixels").unwrap();

    let mut api = api(home.path());
    api.add_asset(None, "foo/bar.jpg", None).unwrap();
    let recipes = vec![
        canonical::parse("resize+250,250").unwrap(),
        canonical::parse("resize+250,250|colorize+250,250,250").unwrap(),
    ];
    api.materialize("foo/bar.jpg", &recipes, &tag).unwrap();

    api.move_asset("foo/bar.jpg", "alpha/beta", Some("baz"))
        .unwrap();

    assert_eq!(fs::read(root.join("alpha/beta/baz.jpg")).unwrap(), b"pixels");
    assert_eq!(
        fs::read(root.join("alpha/beta/baz-resize+250,250.jpg")).unwrap(),
        b"pixelsresize+250,250"
    );
    assert!(root
        .join("alpha/beta/baz-colorize+250,250,250|resize+250,250.jpg")
        .exists());
    assert!(root.join("alpha/beta/baz.jpg.json").exists());
    assert!(!root.join("foo/bar.jpg").exists());
    assert!(!root.join("foo/bar-resize+250,250.jpg").exists());
    assert!(!root.join("foo/bar.jpg.json").exists());

    // The record store reflects the new location after a reload.
    let reopened = crate::api(home.path());
    let assets = reopened.store().list_assets().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].directory, "alpha/beta");
    assert_eq!(assets[0].filename, "baz");
    assert_eq!(reopened.history("alpha/beta/baz.jpg").unwrap().history, recipes);
}

#[test]
fn collision_leaves_everything_in_place() {
    let home = tempfile::tempdir().unwrap();
    let root = home.path().join("disks/local");
    fs::create_dir_all(root.join("foo")).unwrap();
    fs::create_dir_all(root.join("alpha")).unwrap();
    fs::write(root.join("foo/bar.jpg"), b"pixels").unwrap();
    fs::write(root.join("alpha/bar-resize+10,10.jpg"), b"squatter").unwrap();

    let mut api = api(home.path());
    api.add_asset(None, "foo/bar.jpg", None).unwrap();
    api.materialize(
        "foo/bar.jpg",
        &[canonical::parse("resize+10,10").unwrap()],
        &tag,
    )
    .unwrap();

    let err = api.move_asset("foo/bar.jpg", "alpha", None).unwrap_err();
    assert!(matches!(err, MediaError::DestinationExists(_)));

    assert!(root.join("foo/bar.jpg").exists());
    assert!(root.join("foo/bar-resize+10,10.jpg").exists());
    assert!(!root.join("alpha/bar.jpg").exists());
    assert_eq!(
        fs::read(root.join("alpha/bar-resize+10,10.jpg")).unwrap(),
        b"squatter"
    );
    let assets = api.store().list_assets().unwrap();
    assert_eq!(assets[0].directory, "foo");
}
