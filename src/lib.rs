//! lambda-janitor
//!
//! A scheduled maintenance Lambda that prunes old, unaliased versions of
//! Lambda functions. Each run recomputes, per function, which versions are
//! safe to delete: anything referenced by an alias, anything among the N most
//! recently created versions, and anything younger than the grace period
//! survives; the rest is deleted. `$LATEST` is never a candidate.
//!
//! Module layout:
//! - **api**: the management API seam ([`api::LambdaApi`]), its AWS SDK
//!   implementation, and the pagination helper
//! - **cleanup**: the pure retention policy and the worker that applies it
//! - **config**: per-run configuration with payload-driven overrides
//! - **handler**: invocation payload and response shaping
//! - **error**: the error taxonomy

pub mod api;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod handler;

pub use cleanup::run_cleanup;
pub use config::JanitorConfig;
pub use error::JanitorError;
