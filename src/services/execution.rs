//! # Execution Service
//!
//! The bulk-action endpoint: one request fans out to many resources and
//! returns one operation handle per unit of remote work.

use async_trait::async_trait;

use crate::orchestration::types::{ActionParameters, CorrelationId, OperationId, ResourceId};
use crate::services::ServiceError;

/// Remote endpoint that initiates a bulk action over a set of resources.
///
/// Submission mutates remote state and is not idempotent: resubmitting a batch
/// duplicates work. Callers must treat retries as deliberate new submissions
/// with fresh correlation identifiers; the orchestration core never retries
/// submission automatically.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Submit one bulk action covering `resource_ids`.
    ///
    /// Returns the operation handles the service created, one per resource in
    /// the happy path. The correlation identifier ties this submission to its
    /// later status queries for tracing.
    async fn submit_bulk_action(
        &self,
        resource_ids: &[ResourceId],
        correlation_id: &CorrelationId,
        parameters: &ActionParameters,
    ) -> Result<Vec<OperationId>, ServiceError>;
}
