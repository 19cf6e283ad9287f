//! Path normalization for root identity comparison.
//!
//! Roots arrive from flags, environment variables, and upward discovery, so
//! the same directory can be spelled several ways. Everything that compares
//! or deduplicates roots goes through [`normalize`] first.

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a tilde prefix come back unchanged, as does the original
/// path when no home directory can be determined.
pub fn expand_user(path: &Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\"))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Normalize a path to a stable absolute form.
///
/// Tilde-expands, absolutizes relative paths against `base`, removes `.` and
/// `..` components lexically, then resolves symlinks when the path exists on
/// disk. Paths that do not exist yet keep their cleaned lexical form, so
/// missing roots still normalize deterministically.
pub fn normalize(path: &Path, base: &Path) -> PathBuf {
    let expanded = expand_user(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    let cleaned = clean_components(&absolute);
    dunce::canonicalize(&cleaned).unwrap_or(cleaned)
}

/// Lexically remove `.` and `..` from an absolute path.
fn clean_components(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // pop is a no-op at the root, so "/.." stays "/"
            Component::ParentDir => {
                out.pop();
            }
            _ => out.push(component.as_os_str()),
        }
    }
    out
}

/// Render `path` relative to `root` using forward slashes.
///
/// Digest input lines use this form so tree hashes match across platforms.
pub fn relative_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
