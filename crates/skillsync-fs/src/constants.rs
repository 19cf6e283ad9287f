//! Well-known names and markers of the skill tree layout.

use std::fmt;
use std::path::Path;

/// Marker files and directory names that define the skill layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillPath {
    /// `skills` directory under a repository root or tool home
    SkillsDir,
    /// `SKILL.md` manifest inside a skill directory
    Manifest,
    /// `AGENTS.md` marker at the top of a canonical repository
    AgentsMarker,
    /// `skills.json` index at the top of a canonical repository
    ManifestIndex,
}

impl SkillPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkillsDir => "skills",
            Self::Manifest => "SKILL.md",
            Self::AgentsMarker => "AGENTS.md",
            Self::ManifestIndex => "skills.json",
        }
    }
}

impl AsRef<Path> for SkillPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for SkillPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SkillPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entry names excluded from scans and tree digests wherever they appear.
pub const IGNORED_NAMES: [&str; 3] = [".DS_Store", "__pycache__", ".git"];

/// File suffixes of compiled artifacts excluded from tree digests.
pub const ARTIFACT_SUFFIXES: [&str; 1] = [".pyc"];

/// Path fragment that marks a root as a read-only plugin cache.
pub const PLUGIN_CACHE_FRAGMENT: &str = "/.claude/plugins/cache";

/// True when the entry name starts with a dot.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// True when the entry name is in the fixed ignore set.
pub fn is_ignored_name(name: &str) -> bool {
    IGNORED_NAMES.contains(&name)
}

/// True when the file name carries a compiled-artifact suffix.
pub fn is_artifact(name: &str) -> bool {
    ARTIFACT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
