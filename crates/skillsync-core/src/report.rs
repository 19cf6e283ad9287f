//! Report vocabulary and serialization.
//!
//! Everything the engine emits is JSON-serializable: the audit report, the
//! discover listing, and the building blocks they share. Field names and
//! enum spellings are part of the tool's external surface, consumed by
//! scripts that parse `--format json` output, so they are fixed here and
//! covered by tests.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use skillsync_fs::expand_user;

use crate::error::{Error, Result};
use crate::inventory::{RootInventory, scan_root};
use crate::roots::{Context, RootKind};

/// Current UTC time without sub-second precision, RFC 3339.
pub fn utc_now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// How much a finding matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

/// What kind of drift or invalidity a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    InvalidSkillDir,
    ContentDrift,
    MissingGlobalMirror,
    GlobalDrift,
    LocalDuplicateGlobal,
    LocalDuplicateGlobalIdentical,
}

impl IssueCode {
    /// Get the string representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidSkillDir => "INVALID_SKILL_DIR",
            Self::ContentDrift => "CONTENT_DRIFT",
            Self::MissingGlobalMirror => "MISSING_GLOBAL_MIRROR",
            Self::GlobalDrift => "GLOBAL_DRIFT",
            Self::LocalDuplicateGlobal => "LOCAL_DUPLICATE_GLOBAL",
            Self::LocalDuplicateGlobalIdentical => "LOCAL_DUPLICATE_GLOBAL_IDENTICAL",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One audit finding. The optional path fields identify the roots involved
/// and vary by code; absent fields are omitted from JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub code: IssueCode,
    pub skill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_root: Option<PathBuf>,
    pub message: String,
}

impl Issue {
    fn bare(severity: Severity, code: IssueCode, skill: &str, message: &str) -> Self {
        Self {
            severity,
            code,
            skill: skill.to_string(),
            root: None,
            canonical: None,
            global_root: None,
            local_root: None,
            message: message.to_string(),
        }
    }

    /// A child of `root` that looks like a slot but has no valid manifest.
    pub fn invalid_skill_dir(skill: &str, root: &Path) -> Self {
        let mut issue = Self::bare(
            Severity::Warning,
            IssueCode::InvalidSkillDir,
            skill,
            "Directory does not contain a valid SKILL.md",
        );
        issue.root = Some(root.to_path_buf());
        issue
    }

    /// A copy in `root` whose hash differs from the canonical copy.
    pub fn content_drift(skill: &str, root: &Path, canonical: &Path) -> Self {
        let mut issue = Self::bare(
            Severity::Warning,
            IssueCode::ContentDrift,
            skill,
            "Skill content differs from canonical copy",
        );
        issue.root = Some(root.to_path_buf());
        issue.canonical = Some(canonical.to_path_buf());
        issue
    }

    /// A canonical skill absent from the global mirror at `root`.
    pub fn missing_global_mirror(skill: &str, root: &Path, canonical: &Path) -> Self {
        let mut issue = Self::bare(
            Severity::Info,
            IssueCode::MissingGlobalMirror,
            skill,
            "Canonical skill missing in global mirror",
        );
        issue.root = Some(root.to_path_buf());
        issue.canonical = Some(canonical.to_path_buf());
        issue
    }

    /// A global copy in `root` diverging from the preferred global copy.
    pub fn global_drift(skill: &str, root: &Path, preferred: &Path) -> Self {
        let mut issue = Self::bare(
            Severity::Warning,
            IssueCode::GlobalDrift,
            skill,
            "Global copies differ from preferred global source",
        );
        issue.root = Some(root.to_path_buf());
        issue.global_root = Some(preferred.to_path_buf());
        issue
    }

    /// A local copy shadowing a global skill; `identical` selects the
    /// info-level variant for byte-identical copies.
    pub fn local_duplicate(
        skill: &str,
        local_root: &Path,
        global_root: &Path,
        identical: bool,
    ) -> Self {
        let mut issue = if identical {
            Self::bare(
                Severity::Info,
                IssueCode::LocalDuplicateGlobalIdentical,
                skill,
                "Local copy matches global; symlink recommended",
            )
        } else {
            Self::bare(
                Severity::Warning,
                IssueCode::LocalDuplicateGlobal,
                skill,
                "Local copy duplicates a global skill and should link to global",
            )
        };
        issue.local_root = Some(local_root.to_path_buf());
        issue.global_root = Some(global_root.to_path_buf());
        issue
    }
}

/// What an action does to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SyncCopy,
    CreateCopy,
    RelinkToGlobal,
}

impl ActionKind {
    /// Get the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SyncCopy => "sync_copy",
            Self::CreateCopy => "create_copy",
            Self::RelinkToGlobal => "relink_to_global",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One proposed reconciliation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "action")]
    pub kind: ActionKind,
    pub skill: String,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub reason: String,
}

impl Action {
    fn new(kind: ActionKind, skill: &str, source: &Path, dest: PathBuf, reason: &str) -> Self {
        Self {
            kind,
            skill: skill.to_string(),
            source: source.to_path_buf(),
            dest,
            reason: reason.to_string(),
        }
    }

    /// Copy the canonical tree over a drifted copy.
    pub fn sync_with_canonical(skill: &str, source: &Path, dest: PathBuf) -> Self {
        Self::new(
            ActionKind::SyncCopy,
            skill,
            source,
            dest,
            "Align with canonical copy",
        )
    }

    /// Create a missing global mirror from the canonical tree.
    pub fn create_global_mirror(skill: &str, source: &Path, dest: PathBuf) -> Self {
        Self::new(
            ActionKind::CreateCopy,
            skill,
            source,
            dest,
            "Create missing global mirror from canonical",
        )
    }

    /// Copy the preferred global tree over a diverging global copy.
    pub fn sync_with_preferred_global(skill: &str, source: &Path, dest: PathBuf) -> Self {
        Self::new(
            ActionKind::SyncCopy,
            skill,
            source,
            dest,
            "Align global copy with preferred global source",
        )
    }

    /// Replace a local copy with a symlink to the global copy.
    pub fn relink_to_global(skill: &str, source: &Path, dest: PathBuf) -> Self {
        Self::new(
            ActionKind::RelinkToGlobal,
            skill,
            source,
            dest,
            "Prefer global link for local duplicate",
        )
    }
}

/// How local copies of globally available skills are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalPolicy {
    /// Local duplicates should become symlinks to the global copy
    #[default]
    PreferGlobalLink,
    /// Local copies are left alone and never flagged
    KeepLocal,
}

/// Per-root summary carried in audit reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootSummary {
    pub path: PathBuf,
    pub kind: RootKind,
    pub label: String,
    pub exists: bool,
    pub skill_count: usize,
    pub invalid_entries: Vec<String>,
}

impl From<&RootInventory> for RootSummary {
    fn from(inventory: &RootInventory) -> Self {
        Self {
            path: inventory.root.path.clone(),
            kind: inventory.root.kind,
            label: inventory.root.label.clone(),
            exists: inventory.root.exists,
            skill_count: inventory.skills.len(),
            invalid_entries: inventory.invalid_entries.clone(),
        }
    }
}

/// Per-root listing carried in discover reports, with skill names included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootListing {
    pub path: PathBuf,
    pub kind: RootKind,
    pub label: String,
    pub exists: bool,
    pub skills: Vec<String>,
    pub skill_count: usize,
    pub invalid_entries: Vec<String>,
}

impl From<&RootInventory> for RootListing {
    fn from(inventory: &RootInventory) -> Self {
        Self {
            path: inventory.root.path.clone(),
            kind: inventory.root.kind,
            label: inventory.root.label.clone(),
            exists: inventory.root.exists,
            skills: inventory.skills.keys().cloned().collect(),
            skill_count: inventory.skills.len(),
            invalid_entries: inventory.invalid_entries.clone(),
        }
    }
}

/// Full drift audit result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub generated_at: String,
    pub cwd: PathBuf,
    pub canonical_root: Option<PathBuf>,
    pub roots: Vec<RootSummary>,
    pub local_policy: LocalPolicy,
    pub keep_local_skills: Vec<String>,
    pub enforce_mirror: bool,
    pub issues: Vec<Issue>,
    pub actions: Vec<Action>,
}

/// Root inventory listing produced by the discover operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverReport {
    pub generated_at: String,
    pub cwd: PathBuf,
    pub canonical_root: Option<PathBuf>,
    pub roots: Vec<RootListing>,
}

/// Scan every root in the context and list what was found.
///
/// # Errors
///
/// Returns an error if any root scan fails.
pub fn build_discover_report(context: &Context) -> Result<DiscoverReport> {
    let mut roots = Vec::with_capacity(context.roots.len());
    for root in &context.roots {
        let inventory = scan_root(root)?;
        roots.push(RootListing::from(&inventory));
    }
    Ok(DiscoverReport {
        generated_at: utc_now_iso(),
        cwd: context.cwd.clone(),
        canonical_root: context.canonical_root.clone(),
        roots,
    })
}

/// Write a payload as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json_file<T: Serialize>(path: &Path, payload: &T) -> Result<()> {
    let path = expand_user(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let mut body = serde_json::to_string_pretty(payload)?;
    body.push('\n');
    fs::write(&path, body).map_err(|e| Error::io(&path, e))
}
