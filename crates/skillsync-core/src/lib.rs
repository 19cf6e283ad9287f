//! Root discovery, drift auditing, and reconciliation for skill trees
//!
//! A skill is a named directory bundle identified by a `SKILL.md` manifest.
//! Copies of the same skill accumulate in a canonical repository, per-tool
//! global mirrors, and ad-hoc local roots; this crate finds those roots,
//! hashes every copy, reports drift between them, and can reconcile the
//! drift with backed-up copies and symlinks.
//!
//! The pipeline is three calls: [`resolve_context`] decides which roots
//! participate, [`build_audit_report`] scans them and plans actions, and
//! [`apply_actions`] executes (or merely echoes) the plan.

pub mod apply;
pub mod audit;
pub mod config;
pub mod error;
pub mod inventory;
pub mod report;
pub mod roots;

pub use apply::{ActionFailure, ApplyMode, BackupEntry, SyncOutcome, apply_actions};
pub use audit::{AuditOptions, build_audit_report, preferred_global_for_skill};
pub use config::{AGENTS_HOME_ENV, CLAUDE_HOME_ENV, CODEX_HOME_ENV, GlobalRootsConfig};
pub use error::{Error, Result};
pub use inventory::{RootInventory, SkillEntry, SlotKind, is_valid_skill, scan_root};
pub use report::{
    Action, ActionKind, AuditReport, DiscoverReport, Issue, IssueCode, LocalPolicy, RootListing,
    RootSummary, Severity, build_discover_report, utc_now_iso, write_json_file,
};
pub use roots::{
    Context, ContextOptions, RootKind, RootSpec, discover_repo_root, is_plugin_cache_path,
    normalize_skills_root, resolve_context,
};
