//! Drift audit across canonical, global, and local roots.
//!
//! The audit is a pure function of on-disk state and its options: roots are
//! scanned, then a fixed rule pipeline runs per skill name in sorted order.
//! Issues describe what is wrong; actions describe how the executor would
//! fix it. Rule order and root order are stable so two runs over the same
//! tree produce identical reports.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use crate::error::Result;
use crate::inventory::{RootInventory, SkillEntry, scan_root};
use crate::report::{Action, ActionKind, AuditReport, Issue, LocalPolicy, RootSummary, utc_now_iso};
use crate::roots::{Context, RootKind, RootSpec};

/// Fixed priority order used to pick the preferred global copy of a skill.
pub const GLOBAL_PREFERENCE: [RootKind; 3] = [
    RootKind::GlobalAgents,
    RootKind::GlobalCodex,
    RootKind::GlobalClaude,
];

/// Caller-supplied knobs for [`build_audit_report`].
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    pub local_policy: LocalPolicy,
    /// Skill names exempted from local relinking
    pub keep_local_skills: BTreeSet<String>,
    pub enforce_mirror: bool,
}

/// Pick the preferred global copy of `skill`: the first kind in
/// [`GLOBAL_PREFERENCE`] whose root holds it.
pub fn preferred_global_for_skill<'a>(
    skill: &str,
    inventories: &'a [RootInventory],
) -> Option<(&'a RootSpec, &'a SkillEntry)> {
    for kind in GLOBAL_PREFERENCE {
        if let Some(inventory) = inventories.iter().find(|inv| inv.root.kind == kind)
            && let Some(entry) = inventory.skills.get(skill)
        {
            return Some((&inventory.root, entry));
        }
    }
    None
}

/// Scan every root in the context and detect drift.
///
/// Rule pipeline per skill, in order: comparison against the canonical
/// copy, mirror enforcement, cross-global drift against the preferred
/// global copy, and local duplication of globally available skills.
/// Actions are deduplicated by `(kind, dest)`; the earliest rule to target
/// a destination wins.
///
/// # Errors
///
/// Returns an error if any root scan fails.
pub fn build_audit_report(context: &Context, options: &AuditOptions) -> Result<AuditReport> {
    let inventories: Vec<RootInventory> = context
        .roots
        .iter()
        .map(scan_root)
        .collect::<Result<_>>()?;

    let canonical_inventory = context
        .canonical_root
        .as_ref()
        .and_then(|canonical| inventories.iter().find(|inv| &inv.root.path == canonical));

    let mut issues: Vec<Issue> = Vec::new();
    let mut actions: Vec<Action> = Vec::new();

    for inventory in &inventories {
        for name in &inventory.invalid_entries {
            issues.push(Issue::invalid_skill_dir(name, &inventory.root.path));
        }
    }

    let mut skill_names: BTreeSet<&str> = BTreeSet::new();
    for inventory in &inventories {
        skill_names.extend(inventory.skills.keys().map(String::as_str));
    }

    for skill in skill_names {
        let entries: Vec<(&RootSpec, &SkillEntry)> = inventories
            .iter()
            .filter_map(|inv| inv.skills.get(skill).map(|entry| (&inv.root, entry)))
            .collect();
        let preferred = preferred_global_for_skill(skill, &inventories);
        let exempt = options.keep_local_skills.contains(skill);
        let canonical_entry =
            canonical_inventory.and_then(|inventory| inventory.skills.get(skill));

        if let Some(canonical_entry) = canonical_entry {
            for (root, entry) in entries.iter().copied() {
                if root.kind == RootKind::Canonical {
                    continue;
                }
                // local duplication is judged against the global copy instead
                if root.kind == RootKind::Local
                    && options.local_policy == LocalPolicy::PreferGlobalLink
                    && !exempt
                    && preferred.is_some()
                {
                    continue;
                }
                if entry.dir_hash != canonical_entry.dir_hash {
                    issues.push(Issue::content_drift(skill, &root.path, &canonical_entry.path));
                    actions.push(Action::sync_with_canonical(
                        skill,
                        &canonical_entry.path,
                        root.path.join(skill),
                    ));
                }
            }

            if options.enforce_mirror {
                for inventory in &inventories {
                    if !inventory.root.kind.is_global() || inventory.skills.contains_key(skill) {
                        continue;
                    }
                    issues.push(Issue::missing_global_mirror(
                        skill,
                        &inventory.root.path,
                        &canonical_entry.path,
                    ));
                    actions.push(Action::create_global_mirror(
                        skill,
                        &canonical_entry.path,
                        inventory.root.path.join(skill),
                    ));
                }
            }
        }

        // cross-global drift is checked even when canonical is absent
        let global_entries: Vec<(&RootSpec, &SkillEntry)> = entries
            .iter()
            .copied()
            .filter(|(root, _)| root.kind.is_global())
            .collect();
        if global_entries.len() > 1
            && let Some((_, preferred_entry)) = preferred
        {
            for (root, entry) in global_entries {
                if entry.path == preferred_entry.path
                    || entry.dir_hash == preferred_entry.dir_hash
                {
                    continue;
                }
                issues.push(Issue::global_drift(skill, &root.path, &preferred_entry.path));
                if canonical_entry.is_none() {
                    actions.push(Action::sync_with_preferred_global(
                        skill,
                        &preferred_entry.path,
                        root.path.join(skill),
                    ));
                }
            }
        }

        if options.local_policy == LocalPolicy::PreferGlobalLink {
            let Some((_, global_entry)) = preferred else {
                continue;
            };
            let global_target = dunce::canonicalize(&global_entry.path)
                .unwrap_or_else(|_| global_entry.path.clone());

            for (root, entry) in entries.iter().copied() {
                if root.kind != RootKind::Local || exempt {
                    continue;
                }
                if entry.is_link() && entry.resolved_path == global_target {
                    continue;
                }
                let identical = entry.dir_hash == global_entry.dir_hash;
                issues.push(Issue::local_duplicate(
                    skill,
                    &root.path,
                    &global_entry.path,
                    identical,
                ));
                actions.push(Action::relink_to_global(
                    skill,
                    &global_entry.path,
                    root.path.join(skill),
                ));
            }
        }
    }

    let mut seen: HashSet<(ActionKind, PathBuf)> = HashSet::new();
    let actions: Vec<Action> = actions
        .into_iter()
        .filter(|action| seen.insert((action.kind, action.dest.clone())))
        .collect();

    tracing::debug!(
        issues = issues.len(),
        actions = actions.len(),
        "audit complete"
    );

    Ok(AuditReport {
        generated_at: utc_now_iso(),
        cwd: context.cwd.clone(),
        canonical_root: context.canonical_root.clone(),
        roots: inventories.iter().map(RootSummary::from).collect(),
        local_policy: options.local_policy,
        keep_local_skills: options.keep_local_skills.iter().cloned().collect(),
        enforce_mirror: options.enforce_mirror,
        issues,
        actions,
    })
}
