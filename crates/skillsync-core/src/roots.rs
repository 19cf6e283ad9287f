//! Root discovery and classification.
//!
//! A context is the ordered, deduplicated list of skills roots a run works
//! over: the canonical root (explicit or discovered by walking upward from
//! the working directory), the three global mirrors, the working directory's
//! own `skills` directory when present, and any explicitly added roots.
//! Identity is the normalized absolute path; the first occurrence of a path
//! wins and keeps its discovery position.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skillsync_fs::{PLUGIN_CACHE_FRAGMENT, SkillPath, normalize};

use crate::config::GlobalRootsConfig;

/// Classification of a skills root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootKind {
    /// Authoritative source tree, discovered or explicitly given
    Canonical,
    /// Global mirror under the agents home
    GlobalAgents,
    /// Global mirror under the codex home
    GlobalCodex,
    /// Global mirror under the claude home
    GlobalClaude,
    /// Read-only plugin cache, excluded unless requested
    PluginCache,
    /// Any other skills directory
    Local,
}

impl RootKind {
    /// Get the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::GlobalAgents => "global-agents",
            Self::GlobalCodex => "global-codex",
            Self::GlobalClaude => "global-claude",
            Self::PluginCache => "plugin-cache",
            Self::Local => "local",
        }
    }

    /// True for the three per-tool global mirrors.
    pub fn is_global(&self) -> bool {
        matches!(
            self,
            Self::GlobalAgents | Self::GlobalCodex | Self::GlobalClaude
        )
    }
}

impl std::fmt::Display for RootKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified skills root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSpec {
    /// Normalized absolute path, the root's identity
    pub path: PathBuf,
    pub kind: RootKind,
    /// Human-readable label carried into reports
    pub label: String,
    /// Whether the path was a directory when the context was resolved
    pub exists: bool,
}

impl RootSpec {
    pub fn new(path: PathBuf, kind: RootKind, exists: bool) -> Self {
        Self {
            path,
            kind,
            label: kind.as_str().to_string(),
            exists,
        }
    }
}

/// Resolved run context: where we are, what is authoritative, and which
/// roots participate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub cwd: PathBuf,
    pub canonical_root: Option<PathBuf>,
    pub roots: Vec<RootSpec>,
}

/// Caller-supplied knobs for [`resolve_context`].
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Explicit canonical root (repository root or skills directory),
    /// overriding upward discovery
    pub canonical_root: Option<PathBuf>,
    /// Additional skills roots to include
    pub extra_roots: Vec<PathBuf>,
    /// Keep plugin-cache roots instead of dropping them
    pub include_plugin_caches: bool,
}

/// Walk upward from `start` looking for a repository root: a directory with
/// a `skills` child and either an `AGENTS.md` or a `skills.json` marker.
pub fn discover_repo_root(start: &Path) -> Option<PathBuf> {
    for probe in start.ancestors() {
        let has_skills = probe.join(SkillPath::SkillsDir).is_dir();
        let has_marker = probe.join(SkillPath::AgentsMarker).is_file()
            || probe.join(SkillPath::ManifestIndex).is_file();
        if has_skills && has_marker {
            return Some(probe.to_path_buf());
        }
    }
    None
}

/// Accept either a repository root or a skills directory and return the
/// skills directory: when the given path has a `skills` child directory,
/// that child is used.
pub fn normalize_skills_root(path: &Path, cwd: &Path) -> PathBuf {
    let candidate = normalize(path, cwd);
    let nested = candidate.join(SkillPath::SkillsDir);
    if nested.is_dir() {
        normalize(&nested, cwd)
    } else {
        candidate
    }
}

/// True when the path sits inside a plugin cache directory.
pub fn is_plugin_cache_path(path: &Path) -> bool {
    path.to_string_lossy()
        .replace('\\', "/")
        .contains(PLUGIN_CACHE_FRAGMENT)
}

/// Build the run context for `cwd`.
///
/// Root order is canonical, the three globals, the working directory's own
/// `skills` directory, then explicit extras; duplicates collapse onto their
/// first occurrence. Plugin-cache roots are dropped unless requested.
/// `exists` reflects filesystem state at call time.
pub fn resolve_context(
    cwd: &Path,
    globals: &GlobalRootsConfig,
    options: &ContextOptions,
) -> Context {
    let cwd = normalize(cwd, cwd);
    let canonical_root = match &options.canonical_root {
        Some(arg) => Some(normalize_skills_root(arg, &cwd)),
        None => {
            discover_repo_root(&cwd).map(|root| normalize(&root.join(SkillPath::SkillsDir), &cwd))
        }
    };

    let global_roots = globals.skills_roots(&cwd);

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(canonical) = &canonical_root {
        candidates.push(canonical.clone());
    }
    candidates.extend(global_roots.iter().map(|(_, path)| path.clone()));

    let cwd_skills = normalize(&cwd.join(SkillPath::SkillsDir), &cwd);
    if cwd_skills.is_dir() && !candidates.contains(&cwd_skills) {
        candidates.push(cwd_skills);
    }
    for extra in &options.extra_roots {
        candidates.push(normalize_skills_root(extra, &cwd));
    }

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut roots = Vec::new();
    for path in candidates {
        if !seen.insert(path.clone()) {
            continue;
        }
        let kind = classify_root(&path, canonical_root.as_deref(), &global_roots);
        if kind == RootKind::PluginCache && !options.include_plugin_caches {
            continue;
        }
        let exists = path.is_dir();
        roots.push(RootSpec::new(path, kind, exists));
    }

    tracing::debug!(
        roots = roots.len(),
        canonical = canonical_root.is_some(),
        "resolved context"
    );

    Context {
        cwd,
        canonical_root,
        roots,
    }
}

fn classify_root(
    path: &Path,
    canonical: Option<&Path>,
    globals: &[(RootKind, PathBuf); 3],
) -> RootKind {
    if canonical == Some(path) {
        return RootKind::Canonical;
    }
    for (kind, root) in globals {
        if root == path {
            return *kind;
        }
    }
    if is_plugin_cache_path(path) {
        RootKind::PluginCache
    } else {
        RootKind::Local
    }
}
