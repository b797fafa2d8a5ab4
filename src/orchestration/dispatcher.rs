//! # Dispatcher
//!
//! Submits one bulk-action request per batch to the execution endpoint. Each
//! submission gets a fresh correlation identifier. Submission mutates remote
//! state and is never retried here: a failure is returned to the caller and
//! recorded against the batch alone.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::orchestration::errors::OrchestrationError;
use crate::orchestration::types::{
    ActionParameters, ActionRequest, CorrelationId, OperationId, ResourceId,
};
use crate::services::ExecutionService;

/// Accepted submission: the correlation id it was sent under and the
/// operation handles the service created for it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub correlation_id: CorrelationId,
    pub operations: Vec<OperationId>,
}

/// Per-run dispatch component. Cheap to construct; the orchestrator builds one
/// per batch task around a shared execution service handle.
#[derive(Debug)]
pub struct Dispatcher<E> {
    execution: Arc<E>,
    parameters: ActionParameters,
}

impl<E: ExecutionService> Dispatcher<E> {
    pub fn new(execution: Arc<E>, parameters: ActionParameters) -> Self {
        Self {
            execution,
            parameters,
        }
    }

    /// Submit one bulk action covering `resources`.
    ///
    /// Returns the operation handles produced by the endpoint. Failure of one
    /// batch's submission does not cancel or block sibling batches; the
    /// caller records the error and carries on.
    #[instrument(level = "debug", skip(self, resources), fields(batch_size = resources.len()))]
    pub async fn submit(&self, resources: &[ResourceId]) -> Result<Submission, OrchestrationError> {
        let request = ActionRequest::new(resources.to_vec(), self.parameters.clone());

        debug!(
            correlation_id = %request.correlation_id,
            "submitting bulk action"
        );

        let operations = self
            .execution
            .submit_bulk_action(
                &request.resource_ids,
                &request.correlation_id,
                &request.parameters,
            )
            .await
            .map_err(|e| OrchestrationError::SubmissionFailed {
                correlation_id: request.correlation_id,
                message: e.to_string(),
            })?;

        info!(
            correlation_id = %request.correlation_id,
            operations = operations.len(),
            "bulk action accepted"
        );

        Ok(Submission {
            correlation_id: request.correlation_id,
            operations,
        })
    }
}
