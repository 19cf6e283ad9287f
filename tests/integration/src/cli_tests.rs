//! CLI integration tests
//!
//! These tests run the built `skillsync` binary end to end. Every invocation
//! points the global home variables into a scratch tree so the host
//! environment never leaks into a test.

#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use skillsync_core::{AGENTS_HOME_ENV, CLAUDE_HOME_ENV, CODEX_HOME_ENV};
use skillsync_test_utils::SkillTree;

/// Build a `skillsync` command rooted in the scratch tree.
#[allow(deprecated)]
fn skillsync(tree: &SkillTree) -> Command {
    let mut cmd = Command::cargo_bin("skillsync").unwrap();
    cmd.current_dir(tree.path())
        .env(AGENTS_HOME_ENV, tree.path().join("agents-home"))
        .env(CODEX_HOME_ENV, tree.path().join("codex-home"))
        .env(CLAUDE_HOME_ENV, tree.path().join("claude-home"));
    cmd
}

#[test]
fn test_discover_lists_roots() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha\n");

    skillsync(&tree)
        .arg("discover")
        .arg("--canonical-root")
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("Canonical root:"))
        .stdout(predicate::str::contains("global-agents"))
        .stdout(predicate::str::contains("skills=1"));
}

#[test]
fn test_discover_finds_repo_from_cwd() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha\n");

    skillsync(&tree)
        .current_dir(&repo)
        .arg("discover")
        .assert()
        .success()
        .stdout(predicate::str::contains("canonical"));
}

#[test]
fn test_discover_json_is_well_formed() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha\n");

    let output = skillsync(&tree)
        .arg("discover")
        .arg("--format")
        .arg("json")
        .arg("--canonical-root")
        .arg(&repo)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["canonical_root"].is_string());
    let roots = report["roots"].as_array().unwrap();
    assert!(roots.len() >= 4, "expected canonical plus three globals");
    assert_eq!(roots[0]["kind"], "canonical");
    assert_eq!(roots[0]["skills"][0], "alpha");
}

#[test]
fn test_audit_clean_exits_zero() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha\n");

    skillsync(&tree)
        .arg("audit")
        .arg("--canonical-root")
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("Issues: 0"))
        .stdout(predicate::str::contains("no drift found"));
}

#[test]
fn test_audit_drift_exits_two() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");

    skillsync(&tree)
        .arg("audit")
        .arg("--canonical-root")
        .arg(&repo)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("CONTENT_DRIFT"))
        .stdout(predicate::str::contains("Planned actions: 1"));
}

#[test]
fn test_audit_report_out_writes_file() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");

    let report_path = tree.path().join("out/report.json");
    skillsync(&tree)
        .arg("audit")
        .arg("--canonical-root")
        .arg(&repo)
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(2);

    let body = std::fs::read_to_string(&report_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report["issues"][0]["code"], "CONTENT_DRIFT");
    assert_eq!(report["actions"][0]["action"], "sync_copy");
}

#[test]
fn test_sync_dry_run_exits_two_and_changes_nothing() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");

    skillsync(&tree)
        .arg("sync")
        .arg("--canonical-root")
        .arg(&repo)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("DRY-RUN"));

    let stale = tree.path().join("agents-home/skills/alpha/SKILL.md");
    assert_eq!(std::fs::read_to_string(stale).unwrap(), "# Alpha v1\n");
}

#[test]
fn test_sync_apply_fixes_drift_with_default_backup_root() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");

    skillsync(&tree)
        .arg("sync")
        .arg("--apply")
        .arg("--canonical-root")
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("APPLY"))
        .stdout(predicate::str::contains("Applied actions: 1"));

    let mirrored = tree.path().join("agents-home/skills/alpha/SKILL.md");
    assert_eq!(std::fs::read_to_string(mirrored).unwrap(), "# Alpha v2\n");
    // Backups land under the default backup root, relative to the cwd.
    assert!(tree.path().join(".skillsync/backups").is_dir());
}

#[test]
fn test_sync_json_carries_report_and_outcome() {
    let tree = SkillTree::new();
    let repo = tree.canonical_repo("repo");
    tree.skill("repo/skills", "alpha", "# Alpha v2\n");
    tree.skill("agents-home/skills", "alpha", "# Alpha v1\n");

    let output = skillsync(&tree)
        .arg("sync")
        .arg("--format")
        .arg("json")
        .arg("--canonical-root")
        .arg(&repo)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["sync"]["mode"], "dry-run");
    assert_eq!(payload["report"]["issues"][0]["code"], "CONTENT_DRIFT");
    assert_eq!(payload["sync"]["planned"][0]["action"], "sync_copy");
}

#[test]
fn test_completions_bash() {
    let tree = SkillTree::new();
    skillsync(&tree)
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("skillsync"));
}

#[test]
fn test_no_command_prints_hint() {
    let tree = SkillTree::new();
    skillsync(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_unknown_flag_fails() {
    let tree = SkillTree::new();
    skillsync(&tree)
        .arg("discover")
        .arg("--definitely-not-a-flag")
        .assert()
        .failure();
}
