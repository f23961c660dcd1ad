//! Cleanup worker: applies the retention policy across all functions.
//!
//! A run lists every function, then for each function in turn builds a
//! consistent snapshot (aliases, versions, one timestamp fetch per version),
//! plans retention, and deletes the doomed versions sequentially. A failure
//! on one function is recorded and the run continues with the next; only a
//! failure to list the functions themselves aborts the run.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;

use crate::{
    api::{LATEST_SENTINEL, LambdaApi, collect_pages},
    cleanup::policy::{VersionRecord, plan_retention},
    config::JanitorConfig,
    error::JanitorError,
};

/// A function the run could not clean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionFailure {
    pub function_arn: String,
    pub error: String,
}

/// Results from a single cleanup run.
#[derive(Debug, Default)]
pub struct CleanupRunResult {
    /// Number of functions visited (including failed ones).
    pub functions_processed: u64,
    /// Number of versions deleted across all functions.
    pub versions_deleted: u64,
    /// Number of versions kept across all functions.
    pub versions_kept: u64,
    /// Functions that could not be cleaned this run.
    pub failures: Vec<FunctionFailure>,
    /// Duration of the run in milliseconds.
    pub duration_ms: u64,
}

impl CleanupRunResult {
    /// Check if the entire batch completed without a failure.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Check if any versions were deleted.
    pub fn has_deletions(&self) -> bool {
        self.versions_deleted > 0
    }
}

/// Per-function tallies.
struct FunctionCleanStats {
    kept: u64,
    deleted: u64,
}

/// Run a single cleanup pass over every function.
///
/// Each run is independent and idempotent: the keep/delete partition is
/// recomputed from the current remote state, and nothing persists between
/// runs. Failed functions are skipped, not retried within the run.
pub async fn run_cleanup(
    api: &dyn LambdaApi,
    config: &JanitorConfig,
) -> Result<CleanupRunResult, JanitorError> {
    let start = Instant::now();
    let mut result = CleanupRunResult::default();

    let functions = collect_pages(|m| api.list_functions_page(config.page_size, m)).await?;
    tracing::info!(
        count = functions.len(),
        keep_count = config.keep_count,
        "Listed functions to clean"
    );

    for arn in &functions {
        match clean_function(api, config, arn).await {
            Ok(stats) => {
                result.versions_kept += stats.kept;
                result.versions_deleted += stats.deleted;
            }
            Err(e) => {
                tracing::error!(
                    function = %arn,
                    error = %e,
                    "Error cleaning function, continuing with the next"
                );
                result.failures.push(FunctionFailure {
                    function_arn: arn.clone(),
                    error: e.to_string(),
                });
            }
        }
        result.functions_processed += 1;
    }

    result.duration_ms = start.elapsed().as_millis() as u64;

    if result.is_clean() {
        tracing::info!(
            functions = result.functions_processed,
            deleted = result.versions_deleted,
            kept = result.versions_kept,
            duration_ms = result.duration_ms,
            "Cleanup run complete"
        );
    } else {
        tracing::warn!(
            functions = result.functions_processed,
            failed = result.failures.len(),
            deleted = result.versions_deleted,
            duration_ms = result.duration_ms,
            "Cleanup run complete with failures"
        );
    }

    Ok(result)
}

/// Clean one function against a consistent snapshot of its state.
async fn clean_function(
    api: &dyn LambdaApi,
    config: &JanitorConfig,
    arn: &str,
) -> Result<FunctionCleanStats, JanitorError> {
    tracing::info!(function = %arn, "Cleaning function");

    let aliased: HashSet<String> =
        collect_pages(|m| api.list_aliases_page(arn, config.page_size, m))
            .await?
            .into_iter()
            .collect();
    tracing::debug!(function = %arn, aliased = ?aliased, "Found aliased versions");

    let labels: Vec<String> = collect_pages(|m| api.list_versions_page(arn, config.page_size, m))
        .await?
        .into_iter()
        .filter(|label| label != LATEST_SENTINEL)
        .collect();
    tracing::debug!(function = %arn, versions = ?labels, "Found versions");

    // One metadata fetch per version; the cached instant feeds both the sort
    // and the age decision.
    let mut versions = Vec::with_capacity(labels.len());
    for label in labels {
        let created = api.get_version(arn, &label).await?;
        versions.push(VersionRecord::new(label, created));
    }

    let plan = plan_retention(
        &versions,
        &aliased,
        config.keep_count,
        config.grace_period_days,
        Utc::now(),
    );

    for kept in &plan.keep {
        tracing::info!(
            function = %arn,
            version = %kept.label,
            age_days = kept.age_days.abs(),
            reason = ?kept.reason,
            "Keeping version"
        );
    }

    for doomed in &plan.delete {
        tracing::info!(
            function = %arn,
            version = %doomed.label,
            age_days = doomed.age_days,
            "Deleting version"
        );
        api.delete_version(arn, &doomed.label).await?;
    }

    Ok(FunctionCleanStats {
        kept: plan.keep.len() as u64,
        deleted: plan.delete.len() as u64,
    })
}
