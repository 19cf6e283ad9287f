//! [`SkillTree`] builder for skillsync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory with helper methods for laying out skill roots.
///
/// All relative paths are joined onto the (canonicalized) temp root, so a
/// scenario reads as a flat list of `dir`/`file`/`skill` calls:
///
/// ```rust
/// use skillsync_test_utils::SkillTree;
///
/// let tree = SkillTree::new();
/// tree.canonical_repo("repo");
/// tree.skill("repo/skills", "alpha", "# alpha\n");
/// tree.skill("agents-home/skills", "alpha", "# alpha\n");
/// ```
pub struct SkillTree {
    // held for its Drop; the canonicalized root is what tests touch
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for SkillTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("SkillTree::new: failed to create temp dir");
        let root = dunce::canonicalize(temp_dir.path())
            .expect("SkillTree::new: failed to canonicalize temp dir");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// The canonicalized root of the temporary directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create a directory (and parents) at `rel` and return its path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("SkillTree::dir: create {}: {e}", path.display()));
        path
    }

    /// Write a file (creating parents) at `rel` and return its path.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("SkillTree::file: create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("SkillTree::file: write {}: {e}", path.display()));
        path
    }

    /// Create a skill directory `root_rel/name` holding a `SKILL.md` with
    /// `body` and return the skill directory path.
    pub fn skill(&self, root_rel: &str, name: &str, body: &str) -> PathBuf {
        self.skill_with_files(root_rel, name, &[("SKILL.md", body)])
    }

    /// Create a skill directory `root_rel/name` with an arbitrary set of
    /// files (relative path, content) and return the skill directory path.
    pub fn skill_with_files(&self, root_rel: &str, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let skill_dir = self.dir(&format!("{root_rel}/{name}"));
        for (rel, content) in files {
            self.file(&format!("{root_rel}/{name}/{rel}"), content);
        }
        skill_dir
    }

    /// Create a canonical repository at `rel`: an `AGENTS.md` marker plus an
    /// empty `skills` directory. Returns the repository root.
    pub fn canonical_repo(&self, rel: &str) -> PathBuf {
        let repo = self.dir(rel);
        self.file(&format!("{rel}/AGENTS.md"), "# agents\n");
        self.dir(&format!("{rel}/skills"));
        repo
    }

    /// Create a symlink at `link_rel` pointing at `target`.
    #[cfg(unix)]
    pub fn link(&self, target: &Path, link_rel: &str) -> PathBuf {
        let link = self.root.join(link_rel);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("SkillTree::link: create {}: {e}", parent.display()));
        }
        std::os::unix::fs::symlink(target, &link)
            .unwrap_or_else(|e| panic!("SkillTree::link: symlink {}: {e}", link.display()));
        link
    }
}
