//! File-level operations behind the CLI: view, convert and edit.

use std::fs::{self, File};
use std::io::{Cursor, Read, Write};
use std::path::Path;

use tabedit_result::{Error, Result};

use crate::codec::CodecOptions;
use crate::copier::{Copier, MultiCopier};
use crate::editor::Editor;
use crate::names::{FileKind, edit_name};

/// Write the editable form of `path` to `out`.
pub fn view_file(path: &Path, options: &CodecOptions, out: &mut dyn Write) -> Result<()> {
    let kind = FileKind::from_path(path);
    let mut copier = MultiCopier::with_options(kind, kind, options.clone());
    copier.copy_in(out, Box::new(File::open(path)?))?;
    out.flush()?;
    Ok(())
}

/// Convert `src` to `dst`, each side's format taken from its file name.
///
/// Parquet to Parquet reuses the source schema and footer metadata.
pub fn convert_file(src: &Path, dst: &Path, options: &CodecOptions) -> Result<()> {
    let mut copier = MultiCopier::with_options(
        FileKind::from_path(src),
        FileKind::from_path(dst),
        options.clone(),
    );

    let mut buffer = Vec::new();
    copier.copy_in(&mut buffer, Box::new(File::open(src)?))?;
    replace_file(&mut copier, dst, Box::new(Cursor::new(buffer)))?;
    tracing::info!("converted {} to {}", src.display(), dst.display());
    Ok(())
}

/// Open an editable copy of `path` in `editor` and write the result back.
///
/// Returns `false` without touching `path` when the copy was not modified.
pub fn edit_file(path: &Path, options: &CodecOptions, editor: &dyn Editor) -> Result<bool> {
    edit_file_into(path, path, options, editor)
}

/// Open an editable copy of `src` in `editor` and save the result to `dst`.
///
/// Each side's format and compression follow its own file name, so a plain
/// `.parquet` source can be saved as `.parquet.gz`. Nothing is written when
/// the copy was not modified, even if `dst` differs from `src`.
pub fn edit_file_into(
    src: &Path,
    dst: &Path,
    options: &CodecOptions,
    editor: &dyn Editor,
) -> Result<bool> {
    let mut copier = MultiCopier::with_options(
        FileKind::from_path(src),
        FileKind::from_path(dst),
        options.clone(),
    );

    let workdir = tempfile::Builder::new().prefix("tabedit-").tempdir()?;
    let local = workdir.path().join(edit_name(src));
    {
        let mut file = File::create(&local)?;
        copier.copy_in(&mut file, Box::new(File::open(src)?))?;
        file.flush()?;
    }

    let before = fs::read(&local)?;
    editor.edit(&local)?;
    let after = fs::read(&local)?;
    if before == after {
        tracing::info!("no changes to {}, not writing {}", src.display(), dst.display());
        return Ok(false);
    }

    replace_file(&mut copier, dst, Box::new(Cursor::new(after)))?;
    tracing::info!("saved {}", dst.display());
    Ok(true)
}

/// Run `copy_out` into a temporary sibling of `dst`, then move it into
/// place. `dst` is left untouched when the copy fails.
fn replace_file(copier: &mut dyn Copier, dst: &Path, src: Box<dyn Read>) -> Result<()> {
    let parent = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = tempfile::NamedTempFile::new_in(parent)?;
    copier.copy_out(Box::new(staged.reopen()?), src)?;
    staged
        .persist(dst)
        .map_err(|err| Error::Io(err.error))?;
    Ok(())
}
