//! Tree operations used by the reconciliation executor.
//!
//! Copies preserve symlinks as symlinks rather than following them, and
//! moves fall back to copy-and-delete when the rename crosses filesystems
//! (backup roots often live on a different mount than tool homes).

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Recursively copy the directory `src` to `dest`.
///
/// `dest` is created and must not exist yet. Symlinks inside the tree are
/// recreated with their original target string, never followed.
///
/// # Errors
///
/// Returns an error if `dest` already exists or any entry cannot be copied.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir(dest).map_err(|e| Error::io(dest, e))?;
    for entry in fs::read_dir(src).map_err(|e| Error::io(src, e))? {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| Error::io(&from, e))?;

        if file_type.is_symlink() {
            let target = fs::read_link(&from).map_err(|e| Error::io(&from, e))?;
            make_symlink(&target, &to)?;
        } else if file_type.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
        }
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `target`.
#[cfg(unix)]
pub fn make_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link).map_err(|e| Error::io(link, e))
}

/// Create a symlink at `link` pointing to `target`.
///
/// Windows symlinks are typed, so the target is probed (relative targets
/// against the link's parent) to choose the directory or file flavor.
#[cfg(windows)]
pub fn make_symlink(target: &Path, link: &Path) -> Result<()> {
    let probe = if target.is_absolute() {
        target.to_path_buf()
    } else {
        match link.parent() {
            Some(parent) => parent.join(target),
            None => target.to_path_buf(),
        }
    };
    if probe.is_dir() {
        std::os::windows::fs::symlink_dir(target, link).map_err(|e| Error::io(link, e))
    } else {
        std::os::windows::fs::symlink_file(target, link).map_err(|e| Error::io(link, e))
    }
}

/// Move `src` to `dest`, with a copy-and-delete fallback for cross-device
/// renames.
///
/// # Errors
///
/// Returns an error if both the rename and the fallback copy fail.
pub fn move_path(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!(
                src = %src.display(),
                dest = %dest.display(),
                error = %rename_err,
                "rename failed, copying instead"
            );
            let file_type = fs::symlink_metadata(src)
                .map_err(|e| Error::io(src, e))?
                .file_type();

            if file_type.is_dir() {
                copy_tree(src, dest)?;
                fs::remove_dir_all(src).map_err(|e| Error::io(src, e))?;
            } else if file_type.is_symlink() {
                let target = fs::read_link(src).map_err(|e| Error::io(src, e))?;
                make_symlink(&target, dest)?;
                fs::remove_file(src).map_err(|e| Error::io(src, e))?;
            } else {
                fs::copy(src, dest).map_err(|e| Error::io(src, e))?;
                fs::remove_file(src).map_err(|e| Error::io(src, e))?;
            }
            Ok(())
        }
    }
}
