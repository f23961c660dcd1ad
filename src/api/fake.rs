//! In-memory [`LambdaApi`] fake for worker and handler tests.
//!
//! The fake serves real pages (respecting the page bound and continuation
//! markers) so tests exercise the same pagination path as production, records
//! every deletion and metadata fetch, and can be told to fail specific calls.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::{LambdaApi, Page};
use crate::error::JanitorError;

/// A versioned function known to the fake.
#[derive(Debug, Clone)]
pub struct FakeFunction {
    pub arn: String,
    /// (label, created) in listing order. May include `$LATEST`.
    pub versions: Vec<(String, DateTime<Utc>)>,
    /// Version labels referenced by aliases.
    pub aliased: Vec<String>,
}

impl FakeFunction {
    pub fn new(arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            versions: Vec::new(),
            aliased: Vec::new(),
        }
    }

    /// Add a version created `days_ago` whole days before now.
    pub fn version(mut self, label: impl Into<String>, days_ago: i64) -> Self {
        self.versions
            .push((label.into(), Utc::now() - Duration::days(days_ago)));
        self
    }

    /// Add the `$LATEST` pseudo-version to the listing output.
    pub fn latest(mut self) -> Self {
        self.versions.push((super::LATEST_SENTINEL.to_string(), Utc::now()));
        self
    }

    /// Point an alias at a version.
    pub fn alias_to(mut self, label: impl Into<String>) -> Self {
        self.aliased.push(label.into());
        self
    }
}

/// In-memory management API double.
#[derive(Default)]
pub struct FakeLambdaApi {
    functions: Vec<FakeFunction>,
    deleted: Mutex<Vec<(String, String)>>,
    metadata_fetches: Mutex<Vec<(String, String)>>,
    fail_delete_of: Option<(String, String)>,
    fail_versions_of: Option<String>,
}

impl FakeLambdaApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(mut self, function: FakeFunction) -> Self {
        self.functions.push(function);
        self
    }

    /// Make `delete_version` fail for one (function, version) pair.
    pub fn fail_delete_of(mut self, arn: impl Into<String>, version: impl Into<String>) -> Self {
        self.fail_delete_of = Some((arn.into(), version.into()));
        self
    }

    /// Make version listing fail for one function.
    pub fn fail_versions_of(mut self, arn: impl Into<String>) -> Self {
        self.fail_versions_of = Some(arn.into());
        self
    }

    /// (function, version) pairs deleted so far, in call order.
    pub fn deleted(&self) -> Vec<(String, String)> {
        self.deleted.lock().unwrap().clone()
    }

    /// (function, version) pairs whose metadata was fetched, in call order.
    pub fn metadata_fetches(&self) -> Vec<(String, String)> {
        self.metadata_fetches.lock().unwrap().clone()
    }

    fn function(&self, arn: &str) -> Option<&FakeFunction> {
        self.functions.iter().find(|f| f.arn == arn)
    }
}

/// Slice `items` into one page, using the item index as the marker.
fn page_of(items: Vec<String>, page_size: i32, marker: Option<String>) -> Page<String> {
    let start = marker
        .as_deref()
        .and_then(|m| m.parse::<usize>().ok())
        .unwrap_or(0);
    let end = (start + page_size.max(1) as usize).min(items.len());
    let next_marker = (end < items.len()).then(|| end.to_string());

    Page {
        items: items[start..end].to_vec(),
        next_marker,
    }
}

fn remote_failure() -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::other("simulated remote failure"))
}

#[async_trait]
impl LambdaApi for FakeLambdaApi {
    async fn list_functions_page(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError> {
        let arns = self.functions.iter().map(|f| f.arn.clone()).collect();
        Ok(page_of(arns, page_size, marker))
    }

    async fn list_versions_page(
        &self,
        function_arn: &str,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError> {
        if self.fail_versions_of.as_deref() == Some(function_arn) {
            return Err(JanitorError::List {
                resource: "versions",
                source: remote_failure(),
            });
        }

        let labels = self
            .function(function_arn)
            .map(|f| f.versions.iter().map(|(label, _)| label.clone()).collect())
            .unwrap_or_default();
        Ok(page_of(labels, page_size, marker))
    }

    async fn list_aliases_page(
        &self,
        function_arn: &str,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError> {
        let aliased = self
            .function(function_arn)
            .map(|f| f.aliased.clone())
            .unwrap_or_default();
        Ok(page_of(aliased, page_size, marker))
    }

    async fn get_version(
        &self,
        function_arn: &str,
        version: &str,
    ) -> Result<DateTime<Utc>, JanitorError> {
        self.metadata_fetches
            .lock()
            .unwrap()
            .push((function_arn.to_string(), version.to_string()));

        self.function(function_arn)
            .and_then(|f| {
                f.versions
                    .iter()
                    .find(|(label, _)| label == version)
                    .map(|(_, created)| *created)
            })
            .ok_or_else(|| JanitorError::MetadataFetch {
                function: function_arn.to_string(),
                version: version.to_string(),
                source: remote_failure(),
            })
    }

    async fn delete_version(
        &self,
        function_arn: &str,
        version: &str,
    ) -> Result<(), JanitorError> {
        if let Some((arn, v)) = &self.fail_delete_of
            && arn == function_arn
            && v == version
        {
            return Err(JanitorError::Delete {
                function: function_arn.to_string(),
                version: version.to_string(),
                source: remote_failure(),
            });
        }

        self.deleted
            .lock()
            .unwrap()
            .push((function_arn.to_string(), version.to_string()));
        Ok(())
    }
}
