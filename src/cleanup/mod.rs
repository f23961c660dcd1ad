//! Version cleanup: the retention policy and the worker that applies it.
//!
//! The policy (`policy`) is a pure keep/delete partition; the worker
//! (`worker`) feeds it snapshots from the management API and executes the
//! deletions.

pub mod policy;
mod worker;

pub use worker::{CleanupRunResult, FunctionFailure, run_cleanup};
