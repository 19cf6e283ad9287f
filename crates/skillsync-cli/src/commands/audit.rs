//! Audit command: report drift without touching the filesystem.

use std::path::Path;

use colored::Colorize;
use skillsync_core::{AuditReport, GlobalRootsConfig, Severity, build_audit_report, write_json_file};

use super::{audit_options, build_context, print_canonical, print_root_line};
use crate::cli::{OutputArgs, OutputFormat, PolicyArgs, RootArgs};
use crate::error::Result;

/// Most issues listed in a text summary before the rest are elided.
const ISSUE_LINE_CAP: usize = 20;

/// Audit all roots and report drift. Exits 2 when issues were found so
/// scripts can branch on drift without parsing output.
pub fn run_audit(
    cwd: &Path,
    globals: &GlobalRootsConfig,
    roots: &RootArgs,
    policy: &PolicyArgs,
    output: &OutputArgs,
) -> Result<i32> {
    let context = build_context(cwd, globals, roots);
    let report = build_audit_report(&context, &audit_options(policy))?;

    if let Some(path) = &output.report_out {
        write_json_file(path, &report)?;
    }

    match output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_summary(&report),
    }

    Ok(drift_exit_code(&report))
}

/// Exit status shared with dry-run sync: 2 when drift was found.
pub(crate) fn drift_exit_code(report: &AuditReport) -> i32 {
    if report.issues.is_empty() { 0 } else { 2 }
}

/// Print the human-readable report summary.
pub(crate) fn print_summary(report: &AuditReport) {
    print_canonical(report.canonical_root.as_deref());
    println!("Roots:");
    for root in &report.roots {
        print_root_line(root.kind, &root.path, root.skill_count, root.exists);
    }
    println!("Issues: {}", report.issues.len());
    println!("Planned actions: {}", report.actions.len());

    if report.issues.is_empty() {
        println!("{} no drift found", "OK".green().bold());
        return;
    }

    for issue in report.issues.iter().take(ISSUE_LINE_CAP) {
        let code = match issue.severity {
            Severity::Warning => issue.code.as_str().yellow(),
            Severity::Info => issue.code.as_str().blue(),
        };
        println!("- [{}] {}: {}", code, issue.skill, issue.message);
    }
    if report.issues.len() > ISSUE_LINE_CAP {
        println!("- ... ({} more)", report.issues.len() - ISSUE_LINE_CAP);
    }
}
