//! Disk-relative path resolution for assets and their derived variants.
//!
//! ```text
//! {directory}/{filename}.{ext}                       original
//! {directory}/{filename}-{canonical recipe}.{ext}    variant
//! {directory}/{filename}.{ext}.json                  manipulation log
//! ```
//!
//! Paths are plain `/`-separated strings relative to a disk root; the disk backend
//! decides what they map to.

use crate::recipe::Recipe;

pub const LOG_SUFFIX: &str = ".json";

/// Strip leading and trailing `/` from a directory.
pub fn normalize_directory(directory: &str) -> String {
    directory.trim_matches('/').to_string()
}

pub fn basename(filename: &str, extension: &str) -> String {
    if extension.is_empty() {
        filename.to_string()
    } else {
        format!("{}.{}", filename, extension)
    }
}

/// Drop a trailing `.{extension}` from `filename`, once.
pub fn strip_extension<'a>(filename: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() {
        return filename;
    }
    let suffix = format!(".{}", extension);
    filename.strip_suffix(suffix.as_str()).unwrap_or(filename)
}

fn join(directory: &str, basename: &str) -> String {
    let directory = normalize_directory(directory);
    if directory.is_empty() {
        basename.to_string()
    } else {
        format!("{}/{}", directory, basename)
    }
}

/// Resolve the path of the original (empty recipe or manipulation disabled) or
/// of the variant described by `recipe`.
pub fn resolve_path(
    directory: &str,
    filename: &str,
    recipe: &Recipe,
    extension: &str,
    manipulation_enabled: bool,
) -> String {
    if !manipulation_enabled || recipe.is_empty() {
        return join(directory, &basename(filename, extension));
    }
    let derived = format!("{}-{}", filename, recipe.canonical());
    join(directory, &basename(&derived, extension))
}

/// The sidecar log path. Never recipe-suffixed, so all variants share one history.
pub fn resolve_log_path(directory: &str, filename: &str, extension: &str) -> String {
    let plain = resolve_path(directory, filename, &Recipe::new(), extension, false);
    format!("{}{}", plain, LOG_SUFFIX)
}
