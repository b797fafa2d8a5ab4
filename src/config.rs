//! # Configuration
//!
//! Orchestrator construction-time configuration. There are no process-wide
//! singletons: one [`OrchestratorConfig`] is built (from defaults or from the
//! environment), validated, and passed into each component that needs it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env};
use crate::error::{BulkflowError, Result};

/// Configuration for a bulk orchestration run.
///
/// `subscription` and `location` scope the remote services; they are carried
/// opaquely and never interpreted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    pub subscription: String,
    pub location: String,
    /// Maximum identifiers per bulk action request. Must be at least 1.
    pub batch_size: usize,
    /// Delay between successive status queries for one batch.
    pub poll_interval: Duration,
    /// Ceiling on how long a batch is tracked before being declared timed out.
    pub operation_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            subscription: "00000000-0000-0000-0000-000000000000".to_string(),
            location: "local".to_string(),
            batch_size: defaults::BATCH_SIZE,
            poll_interval: Duration::from_secs(defaults::POLL_INTERVAL_SECS),
            operation_timeout: Duration::from_secs(defaults::OPERATION_TIMEOUT_SECS),
        }
    }
}

impl OrchestratorConfig {
    /// Build a configuration from `BULKFLOW_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(subscription) = std::env::var(env::SUBSCRIPTION) {
            config.subscription = subscription;
        }

        if let Ok(location) = std::env::var(env::LOCATION) {
            config.location = location;
        }

        if let Ok(batch_size) = std::env::var(env::BATCH_SIZE) {
            config.batch_size = batch_size.parse().map_err(|e| {
                BulkflowError::Configuration(format!("Invalid batch_size: {e}"))
            })?;
        }

        if let Ok(poll_secs) = std::env::var(env::POLL_INTERVAL_SECS) {
            let secs: u64 = poll_secs.parse().map_err(|e| {
                BulkflowError::Configuration(format!("Invalid poll_interval: {e}"))
            })?;
            config.poll_interval = Duration::from_secs(secs);
        }

        if let Ok(timeout_secs) = std::env::var(env::OPERATION_TIMEOUT_SECS) {
            let secs: u64 = timeout_secs.parse().map_err(|e| {
                BulkflowError::Configuration(format!("Invalid operation_timeout: {e}"))
            })?;
            config.operation_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the orchestrator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(BulkflowError::Configuration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(BulkflowError::Configuration(
                "poll_interval must be greater than zero".to_string(),
            ));
        }
        if self.operation_timeout.is_zero() {
            return Err(BulkflowError::Configuration(
                "operation_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
