//! Reconciliation executor.
//!
//! Dry-run only echoes the plan. Apply mode walks the planned actions in
//! order; any destination that still exists is moved into a timestamped
//! backup directory before the mutation, so every apply can be reversed by
//! restoring the matching backup entry. Failures are captured per action
//! and never abort the batch.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use skillsync_fs::{copy_tree, make_symlink, move_path, normalize, short_path_digest};

use crate::error::{Error, Result};
use crate::report::{Action, ActionKind, AuditReport};

/// Whether the executor mutates the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyMode {
    Apply,
    DryRun,
}

/// One destination moved aside before a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupEntry {
    pub dest: PathBuf,
    pub backup: PathBuf,
}

/// One action that could not be applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionFailure {
    pub action: Action,
    pub error: String,
}

/// Result of one executor run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub mode: ApplyMode,
    pub planned: Vec<Action>,
    pub applied: Vec<Action>,
    pub backups: Vec<BackupEntry>,
    pub errors: Vec<ActionFailure>,
    pub backup_root: PathBuf,
}

/// Execute (or merely echo) the planned actions of an audit report.
///
/// Sources are revalidated at apply time; a vanished source fails its
/// action before the destination is touched. Relative `backup_root` paths
/// resolve against `cwd`.
pub fn apply_actions(
    report: &AuditReport,
    mode: ApplyMode,
    backup_root: &Path,
    cwd: &Path,
) -> SyncOutcome {
    let backup_base = normalize(backup_root, cwd);
    let mut outcome = SyncOutcome {
        mode,
        planned: report.actions.clone(),
        applied: Vec::new(),
        backups: Vec::new(),
        errors: Vec::new(),
        backup_root: backup_base.clone(),
    };
    if mode == ApplyMode::DryRun {
        return outcome;
    }

    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let planned = outcome.planned.clone();

    for action in &planned {
        let source = normalize(&action.source, cwd);
        let dest = normalize(&action.dest, cwd);

        // the report is a snapshot; the source must still be there now
        if !source.is_dir() {
            record_failure(
                &mut outcome,
                action,
                format!("source missing or not a directory: {}", source.display()),
            );
            continue;
        }

        match backup_destination(&dest, &backup_base, &stamp) {
            Ok(Some(backup)) => {
                tracing::debug!(
                    dest = %dest.display(),
                    backup = %backup.display(),
                    "moved destination into backup"
                );
                outcome.backups.push(BackupEntry {
                    dest: dest.clone(),
                    backup,
                });
            }
            Ok(None) => {}
            Err(e) => {
                record_failure(&mut outcome, action, e.to_string());
                continue;
            }
        }

        let mutation = match action.kind {
            ActionKind::SyncCopy | ActionKind::CreateCopy => replace_with_copy(&source, &dest),
            ActionKind::RelinkToGlobal => replace_with_symlink(&source, &dest),
        };
        match mutation {
            Ok(()) => {
                tracing::info!(
                    action = action.kind.as_str(),
                    skill = %action.skill,
                    dest = %dest.display(),
                    "applied action"
                );
                outcome.applied.push(action.clone());
            }
            Err(e) => record_failure(&mut outcome, action, e.to_string()),
        }
    }

    outcome
}

fn record_failure(outcome: &mut SyncOutcome, action: &Action, error: String) {
    tracing::warn!(
        action = action.kind.as_str(),
        skill = %action.skill,
        error = %error,
        "action failed"
    );
    outcome.errors.push(ActionFailure {
        action: action.clone(),
        error,
    });
}

/// Move an existing destination (directory, file, or symlink) into the
/// backup directory for this run. Returns the backup path, or `None` when
/// there was nothing to back up.
fn backup_destination(dest: &Path, backup_root: &Path, stamp: &str) -> Result<Option<PathBuf>> {
    if fs::symlink_metadata(dest).is_err() {
        return Ok(None);
    }

    let backup_dir = backup_root.join(stamp);
    fs::create_dir_all(&backup_dir).map_err(|e| Error::io(&backup_dir, e))?;

    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = format!("{name}-{}", short_path_digest(dest));

    let mut backup_path = backup_dir.join(&base);
    let mut counter = 1;
    while fs::symlink_metadata(&backup_path).is_ok() {
        backup_path = backup_dir.join(format!("{base}-{counter}"));
        counter += 1;
    }

    move_path(dest, &backup_path)?;
    Ok(Some(backup_path))
}

fn replace_with_copy(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    copy_tree(source, dest)?;
    Ok(())
}

fn replace_with_symlink(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    make_symlink(source, dest)?;
    Ok(())
}
