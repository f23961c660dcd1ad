//! AWS SDK implementation of the management API.
//!
//! Uses the AWS SDK for Rust with the standard credential chain (environment,
//! instance profile, etc.). Region and endpoint can be overridden, the latter
//! mainly for localstack-style testing.

use async_trait::async_trait;
use aws_sdk_lambda::Client;
use chrono::{DateTime, Utc};

use super::{LambdaApi, Page};
use crate::error::JanitorError;

/// Textual format of the LastModified field on version descriptors,
/// e.g. `2023-01-01T12:00:00.000+0000`.
const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Configuration for the AWS-backed API client.
#[derive(Debug, Clone, Default)]
pub struct AwsApiConfig {
    /// AWS region (e.g., "us-east-1"). None uses the default provider chain.
    pub region: Option<String>,
    /// Optional endpoint URL for testing with localstack.
    pub endpoint_url: Option<String>,
}

impl AwsApiConfig {
    /// Create a new config with the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            endpoint_url: None,
        }
    }

    /// Create a new config using the default region from the environment.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Set a custom endpoint URL (useful for localstack testing).
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }
}

/// Management API backed by `aws-sdk-lambda`.
pub struct AwsLambdaApi {
    client: Client,
}

impl AwsLambdaApi {
    /// Create a new client with the given configuration.
    pub async fn new(config: AwsApiConfig) -> Self {
        let mut aws_config = aws_config::from_env();

        if let Some(region) = &config.region {
            aws_config = aws_config.region(aws_config::Region::new(region.clone()));
        }

        let aws_config = aws_config.load().await;

        let mut lambda_config = aws_sdk_lambda::config::Builder::from(&aws_config);

        if let Some(endpoint_url) = &config.endpoint_url {
            lambda_config = lambda_config.endpoint_url(endpoint_url);
        }

        Self {
            client: Client::from_conf(lambda_config.build()),
        }
    }

    /// Wrap an already-built SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LambdaApi for AwsLambdaApi {
    async fn list_functions_page(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError> {
        let output = self
            .client
            .list_functions()
            .max_items(page_size)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| JanitorError::List {
                resource: "functions",
                source: Box::new(e.into_service_error()),
            })?;

        Ok(Page {
            items: output
                .functions()
                .iter()
                .filter_map(|f| f.function_arn().map(str::to_string))
                .collect(),
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    async fn list_versions_page(
        &self,
        function_arn: &str,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError> {
        let output = self
            .client
            .list_versions_by_function()
            .function_name(function_arn)
            .max_items(page_size)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| JanitorError::List {
                resource: "versions",
                source: Box::new(e.into_service_error()),
            })?;

        Ok(Page {
            items: output
                .versions()
                .iter()
                .filter_map(|v| v.version().map(str::to_string))
                .collect(),
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    async fn list_aliases_page(
        &self,
        function_arn: &str,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>, JanitorError> {
        let output = self
            .client
            .list_aliases()
            .function_name(function_arn)
            .max_items(page_size)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| JanitorError::List {
                resource: "aliases",
                source: Box::new(e.into_service_error()),
            })?;

        Ok(Page {
            items: output
                .aliases()
                .iter()
                .filter_map(|a| a.function_version().map(str::to_string))
                .collect(),
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    async fn get_version(
        &self,
        function_arn: &str,
        version: &str,
    ) -> Result<DateTime<Utc>, JanitorError> {
        let output = self
            .client
            .get_function()
            .function_name(function_arn)
            .qualifier(version)
            .send()
            .await
            .map_err(|e| JanitorError::MetadataFetch {
                function: function_arn.to_string(),
                version: version.to_string(),
                source: Box::new(e.into_service_error()),
            })?;

        let last_modified = output
            .configuration()
            .and_then(|c| c.last_modified())
            .unwrap_or_default();

        parse_last_modified(function_arn, version, last_modified)
    }

    async fn delete_version(
        &self,
        function_arn: &str,
        version: &str,
    ) -> Result<(), JanitorError> {
        self.client
            .delete_function()
            .function_name(function_arn)
            .qualifier(version)
            .send()
            .await
            .map_err(|e| JanitorError::Delete {
                function: function_arn.to_string(),
                version: version.to_string(),
                source: Box::new(e.into_service_error()),
            })?;

        Ok(())
    }
}

/// Parse a LastModified string into a UTC instant.
///
/// An empty value (absent field) or a value that does not match the fixed
/// format is a `Timestamp` error carrying the raw field verbatim.
fn parse_last_modified(
    function: &str,
    version: &str,
    value: &str,
) -> Result<DateTime<Utc>, JanitorError> {
    DateTime::parse_from_str(value, LAST_MODIFIED_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| JanitorError::Timestamp {
            function: function.to_string(),
            version: version.to_string(),
            value: value.to_string(),
        })
}
