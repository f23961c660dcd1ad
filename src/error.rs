//! Error types for cleanup runs.
//!
//! Errors are not handled at their point of origin: listing, metadata, and
//! deletion failures all bubble up to the cleanup worker, which records them
//! per function and carries on with the rest of the run.

use thiserror::Error;

/// Boxed source error from the AWS SDK (or a test double).
///
/// The `LambdaApi` trait carries sources as boxed errors so it stays
/// object-safe and implementable by in-memory fakes.
pub type ApiErrorSource = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while cleaning up function versions.
#[derive(Debug, Error)]
pub enum JanitorError {
    /// A paginated listing call failed (functions, versions, or aliases).
    #[error("failed to list {resource}: {source}")]
    List {
        /// Which resource kind was being listed.
        resource: &'static str,
        source: ApiErrorSource,
    },

    /// Fetching a version's descriptor from the API failed.
    #[error("failed to fetch metadata for {function} version {version}: {source}")]
    MetadataFetch {
        function: String,
        version: String,
        source: ApiErrorSource,
    },

    /// The version descriptor had a missing or malformed LastModified field.
    #[error("missing or malformed LastModified {value:?} for {function} version {version}")]
    Timestamp {
        function: String,
        version: String,
        /// The raw field value, or empty if the field was absent.
        value: String,
    },

    /// Deleting a version failed.
    #[error("failed to delete {function} version {version}: {source}")]
    Delete {
        function: String,
        version: String,
        source: ApiErrorSource,
    },
}
