//! # Orchestration Error Types
//!
//! Structured error types for the orchestration core using thiserror.
//!
//! These errors are isolation boundaries, not abort signals: a submission or
//! polling failure is recorded against its own batch and folded into the run
//! result, never propagated as an abort of sibling batches.

use thiserror::Error;

use crate::orchestration::types::CorrelationId;

#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// The execution endpoint rejected or failed a batch's submission.
    #[error("Bulk action submission failed (correlation {correlation_id}): {message}")]
    SubmissionFailed {
        correlation_id: CorrelationId,
        message: String,
    },

    /// A status query failed. Transient by policy: the tracker retries on the
    /// next poll cycle, bounded by the batch deadline.
    #[error("Status query failed (correlation {correlation_id}): {message}")]
    PollingFailed {
        correlation_id: CorrelationId,
        message: String,
    },

    /// A batch task panicked. The batch is reported as failed; siblings are
    /// unaffected.
    #[error("Batch task {batch_index} panicked: {message}")]
    TaskPanicked { batch_index: usize, message: String },
}
