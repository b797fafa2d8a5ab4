//! # Error Handling
//!
//! Top-level error type for the crate. Per-subsystem errors live next to the
//! code that raises them (`orchestration::errors`, `services`) and convert into
//! [`BulkflowError`] at the crate boundary.
//!
//! Only configuration errors are fatal to a whole orchestration run. Per-batch
//! and per-operation failures are captured in result types and aggregated, so
//! they never surface through this enum.

use thiserror::Error;

use crate::orchestration::errors::OrchestrationError;
use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum BulkflowError {
    /// Invalid configuration supplied at construction time. Fatal to the run.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An orchestration-level failure that escaped aggregation.
    #[error("Orchestration error: {0}")]
    Orchestration(#[from] OrchestrationError),

    /// A remote service failure raised outside batch isolation (setup paths).
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

pub type Result<T> = std::result::Result<T, BulkflowError>;
