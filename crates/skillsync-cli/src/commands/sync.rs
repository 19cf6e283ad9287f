//! Sync command: plan reconciliation actions and optionally apply them.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use skillsync_core::{
    ApplyMode, AuditReport, GlobalRootsConfig, SyncOutcome, apply_actions, build_audit_report,
    write_json_file,
};

use super::audit::{drift_exit_code, print_summary};
use super::{audit_options, build_context};
use crate::cli::{OutputArgs, OutputFormat, PolicyArgs, RootArgs};
use crate::error::Result;

/// Report plus execution outcome, as written to `--report-out` and JSON output.
#[derive(Serialize)]
struct SyncPayload<'a> {
    report: &'a AuditReport,
    sync: &'a SyncOutcome,
}

/// Audit all roots, then execute the planned actions. Without `apply` this is
/// a dry-run and the exit status mirrors `audit`; with `apply` the exit
/// status is 1 when any action failed.
pub fn run_sync(
    cwd: &Path,
    globals: &GlobalRootsConfig,
    roots: &RootArgs,
    policy: &PolicyArgs,
    apply: bool,
    backup_root: &Path,
    output: &OutputArgs,
) -> Result<i32> {
    let context = build_context(cwd, globals, roots);
    let report = build_audit_report(&context, &audit_options(policy))?;
    let mode = if apply {
        ApplyMode::Apply
    } else {
        ApplyMode::DryRun
    };
    let outcome = apply_actions(&report, mode, backup_root, cwd);

    let payload = SyncPayload {
        report: &report,
        sync: &outcome,
    };
    if let Some(path) = &output.report_out {
        write_json_file(path, &payload)?;
    }

    match output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&payload)?),
        OutputFormat::Text => print_outcome(&report, &outcome, mode),
    }

    if !outcome.errors.is_empty() {
        return Ok(1);
    }
    if mode == ApplyMode::DryRun {
        return Ok(drift_exit_code(&report));
    }
    Ok(0)
}

fn print_outcome(report: &AuditReport, outcome: &SyncOutcome, mode: ApplyMode) {
    let badge = match mode {
        ApplyMode::Apply => "APPLY".green().bold(),
        ApplyMode::DryRun => "DRY-RUN".yellow().bold(),
    };
    println!("Mode: {badge}");
    print_summary(report);
    println!("Applied actions: {}", outcome.applied.len());
    println!("Backups: {}", outcome.backups.len());
    println!("Errors: {}", outcome.errors.len());
    for failure in &outcome.errors {
        println!(
            "- {} {} {} {}",
            failure.action.kind.as_str(),
            failure.action.skill,
            "->".red(),
            failure.error
        );
    }
}
