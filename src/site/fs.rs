//! File-system helpers for writing the output tree.
use std::path::Path;

use crate::error::BuildError;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    Ok(())
}

/// Write `contents` to `path`, creating parent directories first.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be
/// written.
pub fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    ensure_parent_dir(path)?;
    std::fs::write(path, contents).map_err(|e| BuildError::io(path, e))
}

/// Copy a single file, creating the destination's parent directories.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the copy fails.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), BuildError> {
    ensure_parent_dir(dst)?;
    std::fs::copy(src, dst).map_err(|e| BuildError::io(src, e))?;
    Ok(())
}

/// Recursively copy a directory tree and return the number of files copied.
///
/// Symlinks within the source tree are followed: directory symlinks are
/// recursed into and their contents materialised.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    std::fs::create_dir_all(dst).map_err(|e| BuildError::io(dst, e))?;
    let mut copied = 0;
    for entry in std::fs::read_dir(src).map_err(|e| BuildError::io(src, e))? {
        let entry = entry.map_err(|e| BuildError::io(src, e))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).map_err(|e| BuildError::io(&src_path, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}
