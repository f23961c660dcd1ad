//! Invocation entrypoint: payload parsing and response shaping.
//!
//! The scheduler invokes the function with an optional
//! `{"last_version_no": N}` payload overriding the keep count. A fully clean
//! run answers with status 200; a run where any function failed answers with
//! status 500 and a body naming the failure count, so callers can tell the
//! difference without scraping logs.

use serde::{Deserialize, Serialize};

use crate::{api::LambdaApi, cleanup::run_cleanup, config::JanitorConfig};

/// Invocation payload. Unknown fields (e.g. from a scheduled event envelope)
/// are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CleanupRequest {
    /// Keep-count override. Absent means the default of 5.
    #[serde(default)]
    pub last_version_no: Option<i64>,
}

/// Invocation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl CleanupResponse {
    fn ok() -> Self {
        Self {
            status_code: 200,
            body: "Cleanup completed successfully!".to_string(),
        }
    }

    fn failed(body: String) -> Self {
        Self {
            status_code: 500,
            body,
        }
    }
}

/// Run a cleanup for one invocation and shape the outcome into a response.
///
/// Never returns an error to the runtime: failures are reported through the
/// response status so the invocation itself always completes.
pub async fn handle(api: &dyn LambdaApi, request: CleanupRequest) -> CleanupResponse {
    let config = match request.last_version_no {
        Some(keep_count) => JanitorConfig::with_keep_count(keep_count),
        None => JanitorConfig::default(),
    };

    match run_cleanup(api, &config).await {
        Ok(result) if result.is_clean() => CleanupResponse::ok(),
        Ok(result) => CleanupResponse::failed(format!(
            "Cleanup failed for {} of {} functions",
            result.failures.len(),
            result.functions_processed
        )),
        Err(e) => {
            tracing::error!(error = %e, "Error during cleanup");
            CleanupResponse::failed(format!("Cleanup failed: {e}"))
        }
    }
}
