//! Per-root skill inventory.
//!
//! Scanning a root lists its immediate children, keeps the ones that look
//! like skill slots (directories or symlinks carrying a manifest), and
//! computes each survivor's tree digest. Children without a valid manifest
//! are recorded by name rather than treated as errors.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use skillsync_fs::{SkillPath, hash_directory, is_hidden, is_ignored_name};

use crate::error::{Error, Result};
use crate::roots::RootSpec;

/// How a skill occupies its slot in a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    /// Content lives directly under the root
    Real,
    /// Slot is a symlink, with its raw target string
    Link { target: PathBuf },
}

/// One skill as found in one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: String,
    /// Slot path directly under the root
    pub path: PathBuf,
    /// Fully resolved directory the slot points at
    pub resolved_path: PathBuf,
    pub slot: SlotKind,
    /// Tree digest of `resolved_path`
    pub dir_hash: String,
}

impl SkillEntry {
    /// True when the slot is a symlink rather than a real directory.
    pub fn is_link(&self) -> bool {
        matches!(self.slot, SlotKind::Link { .. })
    }

    /// Raw symlink target when the slot is a link.
    pub fn link_target(&self) -> Option<&Path> {
        match &self.slot {
            SlotKind::Link { target } => Some(target),
            SlotKind::Real => None,
        }
    }
}

/// Everything found in one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootInventory {
    pub root: RootSpec,
    /// Valid skills keyed by name, iterated in name order
    pub skills: BTreeMap<String, SkillEntry>,
    /// Names of children that looked like slots but had no valid manifest
    pub invalid_entries: Vec<String>,
}

/// The weak validity probe used during scans: a readable manifest file
/// directly inside the directory. Full manifest-schema validation belongs
/// to packaging tools, not the auditor.
pub fn is_valid_skill(dir: &Path) -> bool {
    dir.join(SkillPath::Manifest).is_file()
}

/// Inventory the immediate children of a root.
///
/// A missing root yields an empty inventory, not an error. Hidden entries
/// and the fixed ignore set are skipped; plain files are not slots and are
/// skipped silently.
///
/// # Errors
///
/// Returns an error if the root's directory listing or a skill's tree
/// digest fails.
pub fn scan_root(root: &RootSpec) -> Result<RootInventory> {
    let mut inventory = RootInventory {
        root: root.clone(),
        skills: BTreeMap::new(),
        invalid_entries: Vec::new(),
    };
    if !root.exists {
        return Ok(inventory);
    }

    let mut children: Vec<(String, PathBuf, fs::FileType)> = Vec::new();
    for entry in fs::read_dir(&root.path).map_err(|e| Error::io(&root.path, e))? {
        let entry = entry.map_err(|e| Error::io(&root.path, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        children.push((
            entry.file_name().to_string_lossy().into_owned(),
            entry.path(),
            file_type,
        ));
    }
    children.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, path, file_type) in children {
        if is_hidden(&name) || is_ignored_name(&name) {
            continue;
        }
        if !file_type.is_dir() && !file_type.is_symlink() {
            continue;
        }
        if !is_valid_skill(&path) {
            inventory.invalid_entries.push(name);
            continue;
        }

        let slot = if file_type.is_symlink() {
            let target = fs::read_link(&path).map_err(|e| Error::io(&path, e))?;
            SlotKind::Link { target }
        } else {
            SlotKind::Real
        };
        // a slot whose resolution is not a directory is invalid, not fatal
        let Ok(resolved_path) = dunce::canonicalize(&path) else {
            inventory.invalid_entries.push(name);
            continue;
        };
        if !resolved_path.is_dir() {
            inventory.invalid_entries.push(name);
            continue;
        }

        let dir_hash = hash_directory(&resolved_path)?;
        inventory.skills.insert(
            name.clone(),
            SkillEntry {
                name,
                path,
                resolved_path,
                slot,
                dir_hash,
            },
        );
    }

    tracing::debug!(
        root = %inventory.root.path.display(),
        skills = inventory.skills.len(),
        invalid = inventory.invalid_entries.len(),
        "scanned root"
    );
    Ok(inventory)
}
