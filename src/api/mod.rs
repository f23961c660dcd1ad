//! The Lambda management API seam.
//!
//! The remote API is consumed through the [`LambdaApi`] trait so the cleanup
//! worker can be driven by the real AWS SDK client in production and by an
//! in-memory fake in tests. All listing operations are page-level; the
//! [`collect_pages`] helper follows continuation markers and flattens the
//! result, identically for functions, versions, and aliases.

use std::future::Future;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::JanitorError;

mod aws;
#[cfg(test)]
pub mod fake;

pub use aws::{AwsApiConfig, AwsLambdaApi};

/// The mutable, always-current pseudo-version. Never a deletion candidate.
pub const LATEST_SENTINEL: &str = "$LATEST";

/// One page of a listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in API-returned order.
    pub items: Vec<T>,
    /// Continuation marker for the next page, absent on the last page.
    pub next_marker: Option<String>,
}

impl<T> Page<T> {
    /// A final page holding all remaining items.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_marker: None,
        }
    }
}

/// Management API surface consumed by the cleanup worker.
///
/// Version lists returned here are raw: they may contain `$LATEST`, which the
/// worker filters out before any evaluation.
#[async_trait]
pub trait LambdaApi: Send + Sync {
    /// One page of function ARNs.
    async fn list_functions_page(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError>;

    /// One page of version labels for a function.
    async fn list_versions_page(
        &self,
        function_arn: &str,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError>;

    /// One page of alias-referenced version labels for a function.
    ///
    /// Alias names are not surfaced; only the versions they point at matter.
    async fn list_aliases_page(
        &self,
        function_arn: &str,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError>;

    /// The creation (LastModified) instant of one version.
    async fn get_version(
        &self,
        function_arn: &str,
        version: &str,
    ) -> Result<DateTime<Utc>, JanitorError>;

    /// Delete one exact version of one function.
    async fn delete_version(&self, function_arn: &str, version: &str)
    -> Result<(), JanitorError>;
}

/// Drive a page-fetching operation to exhaustion and flatten the results.
///
/// Calls `fetch` with no marker first, then with each returned marker, until
/// a page omits the marker. Items are concatenated in fetch order; an empty
/// listing yields an empty vec.
pub async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>, JanitorError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, JanitorError>>,
{
    let mut items = Vec::new();
    let mut marker: Option<String> = None;

    loop {
        let page = fetch(marker.take()).await?;
        items.extend(page.items);
        match page.next_marker {
            Some(next) => marker = Some(next),
            None => break,
        }
    }

    Ok(items)
}
