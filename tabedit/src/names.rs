//! File-name conventions: which copier a path needs and what the editable
//! copy is called.

use std::path::Path;

const GZIP_SUFFIX: &str = ".gz";
const PARQUET_SUFFIX: &str = ".parquet";

/// How a file is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileKind {
    pub compressed: bool,
    pub parquet: bool,
}

impl FileKind {
    /// Classify by suffix. `.gz` is stripped first, so `t.parquet.gz` is
    /// compressed Parquet.
    pub fn from_name(name: &str) -> Self {
        let compressed = name.ends_with(GZIP_SUFFIX);
        let inner = name.strip_suffix(GZIP_SUFFIX).unwrap_or(name);
        Self {
            compressed,
            parquet: inner.ends_with(PARQUET_SUFFIX),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::from_name(&file_name(path))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final path component without a trailing `.gz`.
pub fn base_name(path: &Path) -> String {
    let name = file_name(path);
    match name.strip_suffix(GZIP_SUFFIX) {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// Name of the local copy a user edits: the base name, with `.parquet`
/// replaced by `.csv`.
pub fn edit_name(path: &Path) -> String {
    let base = base_name(path);
    match base.strip_suffix(PARQUET_SUFFIX) {
        Some(stem) => format!("{stem}.csv"),
        None => base,
    }
}
