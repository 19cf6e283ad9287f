//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use skillsync_core::LocalPolicy;

/// Skill root discovery, drift audit, and reconciliation.
#[derive(Parser, Debug)]
#[command(
    name = "skillsync",
    author,
    version,
    about = "Audit and reconcile agent skill directories",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Root selection flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    /// Canonical root (repository root or skills directory); discovered from
    /// the working directory when omitted
    #[arg(long, value_name = "PATH")]
    pub canonical_root: Option<PathBuf>,

    /// Additional skills root to include (repeatable)
    #[arg(long = "root", value_name = "PATH")]
    pub roots: Vec<PathBuf>,

    /// Keep plugin cache roots instead of dropping them
    #[arg(long)]
    pub include_plugin_caches: bool,
}

/// Drift policy flags shared by `audit` and `sync`.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// How local copies of globally available skills are treated
    #[arg(long, value_enum, default_value_t = LocalPolicyArg::PreferGlobalLink)]
    pub local_policy: LocalPolicyArg,

    /// Skill exempt from the local policy (repeatable)
    #[arg(long = "keep-local-skill", value_name = "NAME")]
    pub keep_local_skills: Vec<String>,

    /// Report canonical skills missing from global roots and plan their copies
    #[arg(long)]
    pub enforce_mirror: bool,
}

/// Local duplicate policy as a command-line value.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalPolicyArg {
    /// Replace local duplicates with symlinks to the preferred global copy
    #[default]
    PreferGlobalLink,
    /// Leave local copies alone
    KeepLocal,
}

impl From<LocalPolicyArg> for LocalPolicy {
    fn from(value: LocalPolicyArg) -> Self {
        match value {
            LocalPolicyArg::PreferGlobalLink => LocalPolicy::PreferGlobalLink,
            LocalPolicyArg::KeepLocal => LocalPolicy::KeepLocal,
        }
    }
}

/// Output rendering for reports.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Report output flags shared by `audit` and `sync`.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the JSON report to this file as well
    #[arg(long, value_name = "FILE")]
    pub report_out: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every skill root with its inventory
    ///
    /// Examples:
    ///   skillsync discover
    ///   skillsync discover --canonical-root ~/code/agents --format json
    Discover {
        #[command(flatten)]
        roots: RootArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Audit skill drift across canonical, global, and local roots
    ///
    /// Exits with status 2 when drift is found so scripts can branch on it.
    ///
    /// Examples:
    ///   skillsync audit
    ///   skillsync audit --enforce-mirror --report-out report.json
    Audit {
        #[command(flatten)]
        roots: RootArgs,

        #[command(flatten)]
        policy: PolicyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Plan reconciliation actions, and with --apply execute them
    ///
    /// Without --apply this is a dry-run that prints the plan and exits with
    /// status 2 when drift is found. With --apply, destinations are backed up
    /// before being replaced and the exit status is 1 when any action fails.
    ///
    /// Examples:
    ///   skillsync sync
    ///   skillsync sync --apply --backup-root ~/.skillsync/backups
    Sync {
        #[command(flatten)]
        roots: RootArgs,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Execute the planned actions instead of only printing them
        #[arg(long)]
        apply: bool,

        /// Directory that receives pre-mutation backups in apply mode
        #[arg(long, value_name = "DIR", default_value = ".skillsync/backups")]
        backup_root: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   skillsync completions bash > /etc/bash_completion.d/skillsync
    ///   skillsync completions zsh > ~/.zfunc/_skillsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
