//! # Status Service
//!
//! The operation-status endpoint polled by the tracker. One query covers a
//! whole batch's outstanding operations; cost per poll is proportional to the
//! batch, never to the run as a whole.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::orchestration::types::{CorrelationId, OperationId, OperationState};
use crate::services::ServiceError;

/// State of one remote operation as reported by the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStatus {
    pub operation_id: OperationId,
    pub state: OperationState,
    /// Service-supplied failure detail, when the operation failed.
    pub error: Option<String>,
}

/// Remote endpoint reporting the state of in-flight operations.
#[async_trait]
pub trait StatusService: Send + Sync {
    /// Report current state for each of `operation_ids`.
    ///
    /// The correlation identifier is generated fresh per query, matching the
    /// reference behavior; it signals tracing intent, not deduplication.
    async fn get_operation_status(
        &self,
        operation_ids: &[OperationId],
        correlation_id: &CorrelationId,
    ) -> Result<Vec<OperationStatus>, ServiceError>;
}
