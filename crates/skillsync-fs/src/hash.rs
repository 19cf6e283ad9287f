//! SHA-256 digests for files and whole skill directories.
//!
//! Two skill copies are considered identical exactly when their tree digests
//! match, so everything that feeds the digest must be deterministic: entries
//! are visited depth-first in lexicographic order, file contents are hashed
//! streamed, and symlinks contribute their raw target string without ever
//! being followed.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::constants::{is_artifact, is_hidden, is_ignored_name};
use crate::error::{Error, Result};
use crate::path::relative_posix;

/// Prefix for all checksum values
const CHECKSUM_PREFIX: &str = "sha256:";

/// Compute the identity digest of a skill directory.
///
/// The digest covers relative paths (forward slashes on every platform) and
/// file contents. Ignored names, hidden directories, and compiled artifacts
/// are excluded; hidden files participate. Symlinks are recorded as their
/// raw target string, so a tree containing links hashes the same wherever
/// it lives as long as the link text is unchanged.
///
/// # Errors
///
/// Returns an error if the directory or any entry in it cannot be read.
pub fn hash_directory(root: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    hash_tree_into(root, root, &mut hasher)?;
    Ok(format!("{CHECKSUM_PREFIX}{:x}", hasher.finalize()))
}

fn hash_tree_into(root: &Path, dir: &Path, hasher: &mut Sha256) -> Result<()> {
    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, path) in entries {
        let file_type = fs::symlink_metadata(&path)
            .map_err(|e| Error::io(&path, e))?
            .file_type();

        if file_type.is_symlink() {
            if is_ignored_name(&name) || is_artifact(&name) {
                continue;
            }
            let target = fs::read_link(&path).map_err(|e| Error::io(&path, e))?;
            let line = format!(
                "L:{}:{}\n",
                relative_posix(root, &path),
                target.to_string_lossy()
            );
            hasher.update(line);
        } else if file_type.is_dir() {
            if is_ignored_name(&name) || is_hidden(&name) {
                continue;
            }
            hash_tree_into(root, &path, hasher)?;
        } else if file_type.is_file() {
            if is_ignored_name(&name) || is_artifact(&name) {
                continue;
            }
            hasher.update(format!("F:{}:", relative_posix(root, &path)));
            hasher.update(file_digest(&path)?);
            hasher.update("\n");
        }
        // other entry kinds (sockets, devices) do not participate
    }
    Ok(())
}

/// Bare hex SHA-256 of a file's contents, streamed.
fn file_digest(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| Error::io(path, e))?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// First ten hex characters of the SHA-256 of a path's string form.
///
/// Used to keep backup entries for same-named destinations apart.
pub fn short_path_digest(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    hex[..10].to_string()
}
