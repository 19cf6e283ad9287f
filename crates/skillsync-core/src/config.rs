//! Global root configuration, resolved once at the process boundary.
//!
//! The engine never reads environment state itself. The CLI calls
//! [`GlobalRootsConfig::from_env`] exactly once and hands the result down;
//! tests and embedders construct the struct directly with their own homes.

use std::path::{Path, PathBuf};

use skillsync_fs::{SkillPath, expand_user, normalize};

use crate::roots::RootKind;

/// Environment variable overriding the agents home directory
pub const AGENTS_HOME_ENV: &str = "AGENTS_HOME";
/// Environment variable overriding the codex home directory
pub const CODEX_HOME_ENV: &str = "CODEX_HOME";
/// Environment variable overriding the claude home directory
pub const CLAUDE_HOME_ENV: &str = "CLAUDE_HOME";

/// Base directories hosting the per-tool global skill mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalRootsConfig {
    pub agents_home: PathBuf,
    pub codex_home: PathBuf,
    pub claude_home: PathBuf,
}

impl GlobalRootsConfig {
    /// Read the three home overrides from the environment, falling back to
    /// the fixed defaults under the user's home directory. Empty variables
    /// count as unset.
    pub fn from_env() -> Self {
        Self {
            agents_home: home_from_env(AGENTS_HOME_ENV, "~/.agents"),
            codex_home: home_from_env(CODEX_HOME_ENV, "~/.codex"),
            claude_home: home_from_env(CLAUDE_HOME_ENV, "~/.claude"),
        }
    }

    /// The three global skills roots in preference order, normalized
    /// against `cwd`.
    pub fn skills_roots(&self, cwd: &Path) -> [(RootKind, PathBuf); 3] {
        [
            (
                RootKind::GlobalAgents,
                normalize(&self.agents_home.join(SkillPath::SkillsDir), cwd),
            ),
            (
                RootKind::GlobalCodex,
                normalize(&self.codex_home.join(SkillPath::SkillsDir), cwd),
            ),
            (
                RootKind::GlobalClaude,
                normalize(&self.claude_home.join(SkillPath::SkillsDir), cwd),
            ),
        ]
    }
}

fn home_from_env(var: &str, default: &str) -> PathBuf {
    match std::env::var_os(var) {
        Some(value) if !value.is_empty() => expand_user(Path::new(&value)),
        _ => expand_user(Path::new(default)),
    }
}
