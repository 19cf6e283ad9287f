//! Discover command: list every root with its skill inventory.

use std::path::Path;

use colored::Colorize;
use skillsync_core::{GlobalRootsConfig, build_discover_report};

use super::{build_context, print_canonical, print_root_line};
use crate::cli::{OutputFormat, RootArgs};
use crate::error::Result;

/// Resolve the context, scan every root, and describe what was found.
pub fn run_discover(
    cwd: &Path,
    globals: &GlobalRootsConfig,
    roots: &RootArgs,
    format: OutputFormat,
) -> Result<i32> {
    let context = build_context(cwd, globals, roots);
    let report = build_discover_report(&context)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print_canonical(report.canonical_root.as_deref());
            println!("Roots:");
            for root in &report.roots {
                print_root_line(root.kind, &root.path, root.skill_count, root.exists);
                if !root.invalid_entries.is_empty() {
                    println!("  invalid: {}", root.invalid_entries.join(", ").red());
                }
            }
        }
    }

    Ok(0)
}
