//! Output locations.

use std::path::{Path, PathBuf};

pub const EXPORT_DIR: &str = "export";

/// `<source dir>/export/<source stem>.<extension>`.
pub fn default_destination(source: &Path, extension: &str) -> PathBuf {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let stem = source.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    dir.join(EXPORT_DIR).join(format!("{}.{}", stem, extension))
}
