//! Cleanup configuration.
//!
//! Configuration arrives in the invocation payload rather than a config file:
//! the scheduler passes `{"last_version_no": N}` to override the keep count
//! for a run. The remaining knobs have fixed defaults that match the
//! original deployment.

use serde::{Deserialize, Serialize};

/// Configuration for a single cleanup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JanitorConfig {
    /// How many of the most recently created versions to keep per function,
    /// regardless of age. Zero or negative keeps none by this rule.
    /// Default: 5
    #[serde(default = "default_keep_count")]
    pub keep_count: i64,

    /// Versions no older than this many whole days are kept even when they
    /// fall outside the keep count and have no alias.
    /// Default: 90
    #[serde(default = "default_grace_period_days")]
    pub grace_period_days: i64,

    /// Page bound for listing calls. A throughput knob, not a correctness one.
    /// Default: 20
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            keep_count: default_keep_count(),
            grace_period_days: default_grace_period_days(),
            page_size: default_page_size(),
        }
    }
}

fn default_keep_count() -> i64 {
    5
}

fn default_grace_period_days() -> i64 {
    90
}

fn default_page_size() -> i32 {
    20
}

impl JanitorConfig {
    /// Config with an overridden keep count and defaults elsewhere.
    pub fn with_keep_count(keep_count: i64) -> Self {
        Self {
            keep_count,
            ..Self::default()
        }
    }
}
