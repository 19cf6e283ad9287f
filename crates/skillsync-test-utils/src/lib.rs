//! Shared test fixtures for the skillsync workspace.
//!
//! Provides the [`SkillTree`] builder used by crate test suites and the
//! integration tests to lay out canonical repositories, global mirrors,
//! and local roots inside a temporary directory. Dev-dependency only,
//! never published.

pub mod tree;

pub use tree::SkillTree;
