//! Whole-file reads and atomic replacement.
//!
//! Every output of the generator is buffered in memory first and then moved into
//! place in a single rename, so a failure never leaves a half-written file behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::error::{Error, Result};

/// Reads a whole text file.
///
/// # Arguments
///
/// * `path` - File to read.
///
/// # Returns
///
/// The file contents, or [`Error::Io`] naming `path`.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(Error::io(path))
}

/// New contents of a file, written and flushed beside it but not yet in place.
///
/// Dropping a staged file without committing removes the temporary file and leaves
/// the destination untouched.
#[derive(Debug)]
pub struct StagedFile {
    staged: NamedTempFile,
    path: PathBuf,
    bytes: usize,
}

impl StagedFile {
    /// Destination the file will replace on [`commit`](Self::commit).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames the staged file over its destination.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] naming the destination if the rename fails.
    pub fn commit(self) -> Result<()> {
        let Self {
            staged,
            path,
            bytes,
        } = self;
        let _file = staged
            .persist(&path)
            .map_err(|e| Error::io(&path)(e.error))?;
        tracing::debug!(path = %path.display(), bytes, "replaced file");
        Ok(())
    }
}

/// Writes `contents` to a temporary file in the directory of `path`.
///
/// The data is flushed to disk and an existing destination's permissions are copied,
/// so committing is a single rename.
///
/// # Arguments
///
/// * `path` - Destination file.
/// * `contents` - Complete new contents.
pub fn stage(path: &Path, contents: &str) -> Result<StagedFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(Error::io(dir))?;
    staged
        .write_all(contents.as_bytes())
        .map_err(Error::io(staged.path()))?;
    staged.as_file().sync_all().map_err(Error::io(staged.path()))?;

    if let Ok(meta) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(Error::io(path))?;
    }

    Ok(StagedFile {
        staged,
        path: path.to_path_buf(),
        bytes: contents.len(),
    })
}

/// Replaces `path` with `contents` atomically.
///
/// The data is staged in the destination directory with [`stage`] and renamed over
/// `path`. An existing destination keeps its permissions.
///
/// # Arguments
///
/// * `path` - Destination file.
/// * `contents` - Complete new contents.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    stage(path, contents)?.commit()
}
