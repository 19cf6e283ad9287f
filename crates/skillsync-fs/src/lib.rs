//! Filesystem primitives for skillsync
//!
//! Digests, path normalization, and tree operations shared by the engine
//! and CLI crates. This layer knows the on-disk shape of a skill tree but
//! nothing about roots, policies, or reports.

pub mod constants;
pub mod error;
pub mod hash;
pub mod path;
pub mod tree;

pub use constants::{
    ARTIFACT_SUFFIXES, IGNORED_NAMES, PLUGIN_CACHE_FRAGMENT, SkillPath, is_artifact, is_hidden,
    is_ignored_name,
};
pub use error::{Error, Result};
pub use hash::{hash_directory, short_path_digest};
pub use path::{expand_user, normalize, relative_posix};
pub use tree::{copy_tree, make_symlink, move_path};
