//! # Constants
//!
//! Shared defaults and environment variable names. Defaults mirror the
//! reference behavior: batches of 100 resources, a 30 second poll cadence, and
//! a one hour ceiling on waiting for any single batch.

/// Default values applied by [`crate::config::OrchestratorConfig::default`].
pub mod defaults {
    /// Maximum number of resource identifiers per bulk action request.
    pub const BATCH_SIZE: usize = 100;

    /// Seconds between successive status queries for one batch.
    pub const POLL_INTERVAL_SECS: u64 = 30;

    /// Seconds a tracker waits for a batch before declaring it timed out.
    pub const OPERATION_TIMEOUT_SECS: u64 = 3600;
}

/// Environment variable names read by `from_env` constructors and logging.
pub mod env {
    pub const ENVIRONMENT: &str = "BULKFLOW_ENV";
    pub const SUBSCRIPTION: &str = "BULKFLOW_SUBSCRIPTION";
    pub const LOCATION: &str = "BULKFLOW_LOCATION";
    pub const BATCH_SIZE: &str = "BULKFLOW_BATCH_SIZE";
    pub const POLL_INTERVAL_SECS: &str = "BULKFLOW_POLL_INTERVAL_SECS";
    pub const OPERATION_TIMEOUT_SECS: &str = "BULKFLOW_OPERATION_TIMEOUT_SECS";
}
