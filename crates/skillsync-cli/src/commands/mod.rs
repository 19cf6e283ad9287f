//! Subcommand implementations.

pub mod audit;
pub mod discover;
pub mod sync;

pub use audit::run_audit;
pub use discover::run_discover;
pub use sync::run_sync;

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use colored::Colorize;
use skillsync_core::{
    AuditOptions, Context, ContextOptions, GlobalRootsConfig, RootKind, resolve_context,
};

use crate::cli::{Cli, PolicyArgs, RootArgs};
use crate::error::Result;

/// Resolve the root context from command-line flags.
pub(crate) fn build_context(cwd: &Path, globals: &GlobalRootsConfig, roots: &RootArgs) -> Context {
    let options = ContextOptions {
        canonical_root: roots.canonical_root.clone(),
        extra_roots: roots.roots.clone(),
        include_plugin_caches: roots.include_plugin_caches,
    };
    resolve_context(cwd, globals, &options)
}

/// Translate policy flags into engine options.
pub(crate) fn audit_options(policy: &PolicyArgs) -> AuditOptions {
    AuditOptions {
        local_policy: policy.local_policy.into(),
        keep_local_skills: policy.keep_local_skills.iter().cloned().collect(),
        enforce_mirror: policy.enforce_mirror,
    }
}

/// Print the canonical root line that opens every text rendering.
pub(crate) fn print_canonical(path: Option<&Path>) {
    match path {
        Some(path) => println!("Canonical root: {}", path.display()),
        None => println!("Canonical root: {}", "none".dimmed()),
    }
}

/// Print one root status line.
pub(crate) fn print_root_line(kind: RootKind, path: &Path, skill_count: usize, exists: bool) {
    print!(
        "- {}: {} | skills={}",
        kind.as_str().cyan(),
        path.display(),
        skill_count
    );
    if !exists {
        print!(" {}", "(missing)".yellow());
    }
    println!();
}

/// Generate shell completions on stdout.
pub fn run_completions(shell: Shell) -> Result<i32> {
    let mut command = Cli::command();
    generate(shell, &mut command, "skillsync", &mut io::stdout());
    Ok(0)
}
