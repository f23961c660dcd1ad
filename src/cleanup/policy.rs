//! Retention decision logic.
//!
//! Given a function's versions (with creation instants), its alias-referenced
//! version set, a keep count, and a reference instant, partition the versions
//! into keep and delete. A version survives if it satisfies *any* of three
//! independent rules:
//!
//! 1. an alias points at it (a live traffic pointer; never evaluated further),
//! 2. it is among the N most recently created versions (rollback window),
//! 3. it is no older than the grace period in whole days.
//!
//! The decision is pure and recomputed from scratch on every run; deciding
//! twice on the same inputs yields the same partition.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// A version label paired with its creation instant.
///
/// `$LATEST` must already be excluded; the policy never sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub label: String,
    pub created: DateTime<Utc>,
}

impl VersionRecord {
    pub fn new(label: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            created,
        }
    }
}

/// Why a version was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// An alias references it; age and recency were never evaluated.
    Aliased,
    /// Among the N most recently created versions.
    RecentEnough,
    /// Within the grace period.
    WithinGrace,
}

/// A version that survives the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptVersion {
    pub label: String,
    pub reason: KeepReason,
    /// Whole-day age at decision time. Negative under clock skew, recorded
    /// verbatim.
    pub age_days: i64,
}

/// A version marked for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoomedVersion {
    pub label: String,
    pub age_days: i64,
}

/// The keep/delete partition for one function, in original listing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RetentionPlan {
    pub keep: Vec<KeptVersion>,
    pub delete: Vec<DoomedVersion>,
}

impl RetentionPlan {
    pub fn has_deletions(&self) -> bool {
        !self.delete.is_empty()
    }
}

/// Partition `versions` into keep and delete.
///
/// `versions` is the function's listing-order version history with `$LATEST`
/// excluded. `keep_count <= 0` keeps zero versions by the recency rule; the
/// alias and grace rules still apply. An empty history yields an empty plan.
pub fn plan_retention(
    versions: &[VersionRecord],
    aliased: &HashSet<String>,
    keep_count: i64,
    grace_period_days: i64,
    now: DateTime<Utc>,
) -> RetentionPlan {
    // Stable sort: ties keep listing order, no secondary key is defined.
    let mut by_age: Vec<&VersionRecord> = versions.iter().collect();
    by_age.sort_by_key(|v| v.created);

    let keep_n = keep_count.clamp(0, by_age.len() as i64) as usize;
    let recent: HashSet<&str> = by_age[by_age.len() - keep_n..]
        .iter()
        .map(|v| v.label.as_str())
        .collect();

    let mut plan = RetentionPlan::default();

    for version in versions {
        let age_days = (now - version.created).num_days();

        if aliased.contains(&version.label) {
            plan.keep.push(KeptVersion {
                label: version.label.clone(),
                reason: KeepReason::Aliased,
                age_days,
            });
        } else if recent.contains(version.label.as_str()) {
            plan.keep.push(KeptVersion {
                label: version.label.clone(),
                reason: KeepReason::RecentEnough,
                age_days,
            });
        } else if age_days <= grace_period_days {
            plan.keep.push(KeptVersion {
                label: version.label.clone(),
                reason: KeepReason::WithinGrace,
                age_days,
            });
        } else {
            plan.delete.push(DoomedVersion {
                label: version.label.clone(),
                age_days,
            });
        }
    }

    plan
}
