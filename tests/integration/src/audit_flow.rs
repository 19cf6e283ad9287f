//! End-to-end drift reconciliation flows
//!
//! These tests exercise the complete pipeline through the library surface:
//! resolve_context -> build_audit_report -> apply_actions -> re-audit.

use std::path::PathBuf;

use skillsync_core::{
    ActionKind, ApplyMode, AuditOptions, AuditReport, Context, ContextOptions, GlobalRootsConfig,
    IssueCode, apply_actions, build_audit_report, resolve_context,
};
use skillsync_fs::hash_directory;
use skillsync_test_utils::SkillTree;

fn globals(tree: &SkillTree) -> GlobalRootsConfig {
    GlobalRootsConfig {
        agents_home: tree.path().join("agents-home"),
        codex_home: tree.path().join("codex-home"),
        claude_home: tree.path().join("claude-home"),
    }
}

fn context(tree: &SkillTree, canonical: Option<PathBuf>) -> Context {
    let options = ContextOptions {
        canonical_root: canonical,
        ..ContextOptions::default()
    };
    resolve_context(tree.path(), &globals(tree), &options)
}

fn audit(tree: &SkillTree, canonical: Option<PathBuf>, options: &AuditOptions) -> AuditReport {
    build_audit_report(&context(tree, canonical), options).unwrap()
}

#[test]
fn test_drifted_global_resyncs_from_canonical() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");

    let options = AuditOptions::default();
    let report = audit(&tree, Some(repo.clone()), &options);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].code, IssueCode::ContentDrift);
    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].kind, ActionKind::SyncCopy);

    let stale = tree.path().join("agents-home/skills/alpha");
    let old_hash = hash_directory(&stale).unwrap();

    let backup_root = tree.path().join("backups");
    let outcome = apply_actions(&report, ApplyMode::Apply, &backup_root, tree.path());
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.applied.len(), 1);
    assert_eq!(outcome.backups.len(), 1);

    // The destination now matches canonical and the backup holds the old tree.
    let canonical_hash = hash_directory(&tree.path().join("repo/skills/alpha")).unwrap();
    assert_eq!(hash_directory(&stale).unwrap(), canonical_hash);
    assert_eq!(hash_directory(&outcome.backups[0].backup).unwrap(), old_hash);

    let clean = audit(&tree, Some(repo), &options);
    assert!(clean.issues.is_empty());
    assert!(clean.actions.is_empty());
}

#[cfg(unix)]
#[test]
fn test_local_duplicate_relinks_to_global() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha\n");
    tree.skill("skills", "alpha", "# Alpha\n");

    let options = AuditOptions::default();
    let report = audit(&tree, Some(repo.clone()), &options);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(
        report.issues[0].code,
        IssueCode::LocalDuplicateGlobalIdentical
    );
    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].kind, ActionKind::RelinkToGlobal);

    let backup_root = tree.path().join("backups");
    let outcome = apply_actions(&report, ApplyMode::Apply, &backup_root, tree.path());
    assert!(outcome.errors.is_empty());

    let local = tree.path().join("skills/alpha");
    assert!(local.symlink_metadata().unwrap().file_type().is_symlink());

    // A local slot that already points at the global copy is not drift.
    let clean = audit(&tree, Some(repo), &options);
    assert!(clean.issues.is_empty());
}

#[test]
fn test_enforce_mirror_creates_missing_copies() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "beta", "# Beta\n");

    let options = AuditOptions {
        enforce_mirror: true,
        ..AuditOptions::default()
    };
    let report = audit(&tree, Some(repo.clone()), &options);
    assert_eq!(report.issues.len(), 3);
    assert!(
        report
            .issues
            .iter()
            .all(|i| i.code == IssueCode::MissingGlobalMirror)
    );
    assert_eq!(report.actions.len(), 3);

    let backup_root = tree.path().join("backups");
    let outcome = apply_actions(&report, ApplyMode::Apply, &backup_root, tree.path());
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.applied.len(), 3);
    // Fresh mirrors are created, nothing pre-existing to back up.
    assert!(outcome.backups.is_empty());

    for home in ["agents-home", "codex-home", "claude-home"] {
        let mirrored = tree.path().join(home).join("skills/beta/SKILL.md");
        assert!(mirrored.is_file(), "missing mirror under {home}");
    }

    let clean = audit(&tree, Some(repo), &options);
    assert!(clean.issues.is_empty());
}

#[test]
fn test_cross_global_drift_syncs_preferred() {
    let tree = SkillTree::new();
    tree.skill("agents-home/skills", "gamma", "# Gamma v2\n");
    tree.skill("codex-home/skills", "gamma", "# Gamma v1\n");

    let options = AuditOptions::default();
    let report = audit(&tree, None, &options);
    assert!(report.canonical_root.is_none());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].code, IssueCode::GlobalDrift);
    assert_eq!(report.actions.len(), 1);
    let action = &report.actions[0];
    assert_eq!(action.kind, ActionKind::SyncCopy);
    assert!(action.source.starts_with(tree.path().join("agents-home")));
    assert!(action.dest.starts_with(tree.path().join("codex-home")));

    let backup_root = tree.path().join("backups");
    let outcome = apply_actions(&report, ApplyMode::Apply, &backup_root, tree.path());
    assert!(outcome.errors.is_empty());

    let agents = hash_directory(&tree.path().join("agents-home/skills/gamma")).unwrap();
    let codex = hash_directory(&tree.path().join("codex-home/skills/gamma")).unwrap();
    assert_eq!(agents, codex);

    let clean = audit(&tree, None, &options);
    assert!(clean.issues.is_empty());
}

#[test]
fn test_dry_run_leaves_tree_untouched() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");

    let report = audit(&tree, Some(repo), &AuditOptions::default());
    let stale = tree.path().join("agents-home/skills/alpha");
    let before = hash_directory(&stale).unwrap();

    let backup_root = tree.path().join("backups");
    let outcome = apply_actions(&report, ApplyMode::DryRun, &backup_root, tree.path());
    assert_eq!(outcome.mode, ApplyMode::DryRun);
    assert_eq!(outcome.planned, report.actions);
    assert!(outcome.applied.is_empty());
    assert!(outcome.backups.is_empty());

    assert_eq!(hash_directory(&stale).unwrap(), before);
    assert!(!backup_root.exists());
}

#[test]
fn test_audit_is_deterministic() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("repo/skills", "beta", "# Beta\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");
    tree.skill("codex-home/skills", "alpha", "# Alpha v0\n");
    tree.dir("repo/skills/broken");

    let options = AuditOptions {
        enforce_mirror: true,
        ..AuditOptions::default()
    };
    let first = audit(&tree, Some(repo.clone()), &options);
    let second = audit(&tree, Some(repo), &options);

    assert_eq!(first.issues, second.issues);
    assert_eq!(first.actions, second.actions);
}

#[cfg(unix)]
#[test]
fn test_apply_then_audit_is_clean_for_mixed_drift() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    // One drifted global, one missing mirror, one redundant local copy.
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("repo/skills", "beta", "# Beta\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");
    tree.skill("agents-home/skills", "delta", "# Delta\n");
    tree.skill("skills", "delta", "# Delta\n");

    let options = AuditOptions {
        enforce_mirror: true,
        ..AuditOptions::default()
    };
    let report = audit(&tree, Some(repo.clone()), &options);
    assert!(!report.issues.is_empty());

    let backup_root = tree.path().join("backups");
    let outcome = apply_actions(&report, ApplyMode::Apply, &backup_root, tree.path());
    assert!(outcome.errors.is_empty(), "errors: {:?}", outcome.errors);

    let clean = audit(&tree, Some(repo), &options);
    assert!(clean.issues.is_empty(), "issues: {:?}", clean.issues);
    assert!(clean.actions.is_empty());
}
