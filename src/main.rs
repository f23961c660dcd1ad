//! Lambda bootstrap for the version janitor.

use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing_subscriber::EnvFilter;

use lambda_janitor::{
    api::{AwsApiConfig, AwsLambdaApi},
    handler::{self, CleanupRequest, CleanupResponse},
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // JSON logs without timestamps: CloudWatch supplies its own.
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .init();

    let api = AwsLambdaApi::new(AwsApiConfig::from_env()).await;
    let api = &api;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<CleanupRequest>| async move {
            Ok::<CleanupResponse, Error>(handler::handle(api, event.payload).await)
        },
    ))
    .await
}
