//! # Orchestration Types
//!
//! Core data model shared across the orchestration components: identifiers,
//! action requests, operation states, and the per-batch / per-run result
//! aggregates.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::orchestration::lifecycle::ResourceLifecycle;

/// Opaque handle naming a remote resource. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remote-assigned token for one unit of asynchronous work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(pub String);

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-generated token attached to a request and its related status
/// queries. Unique per submission; signals tracing intent, not deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters applied to every resource in a bulk action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionParameters {
    /// Force the action through provider-side guards (the reference
    /// behavior's forceDeletion flag).
    pub force: bool,
}

/// One bulk-action request covering a single batch. Created once at dispatch
/// time; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub correlation_id: CorrelationId,
    pub resource_ids: Vec<ResourceId>,
    pub parameters: ActionParameters,
}

impl ActionRequest {
    pub fn new(resource_ids: Vec<ResourceId>, parameters: ActionParameters) -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            resource_ids,
            parameters,
        }
    }
}

/// State of one remote operation. The remote service is authoritative;
/// `Unknown` covers wire values this client does not recognize and is treated
/// as non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationState {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

impl OperationState {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Final disposition of one resource at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeState {
    Succeeded,
    Failed,
    /// The orchestrator stopped waiting; the remote operation may still be
    /// running. Local-only state.
    TimedOut,
    /// The batch's submission was rejected or lost; no operation exists for
    /// this resource.
    SubmissionFailed,
}

impl fmt::Display for OutcomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timed_out"),
            Self::SubmissionFailed => write!(f, "submission_failed"),
        }
    }
}

/// Outcome for a single resource, with optional detail for the unsuccessful
/// cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceOutcome {
    pub resource_id: ResourceId,
    pub state: OutcomeState,
    pub detail: Option<String>,
}

/// Aggregate result for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_index: usize,
    /// Correlation id of the submission, when one was issued.
    pub correlation_id: Option<CorrelationId>,
    pub outcomes: Vec<ResourceOutcome>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl BatchResult {
    /// Succeeded only if every resource in the batch succeeded.
    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| o.state == OutcomeState::Succeeded)
    }

    /// Batch whose submission never produced operations: every resource is
    /// marked `SubmissionFailed` with the shared failure detail.
    pub fn submission_failed(
        batch_index: usize,
        resources: Vec<ResourceId>,
        detail: String,
        started_at: DateTime<Utc>,
    ) -> Self {
        let outcomes = resources
            .into_iter()
            .map(|resource_id| ResourceOutcome {
                resource_id,
                state: OutcomeState::SubmissionFailed,
                detail: Some(detail.clone()),
            })
            .collect();

        Self {
            batch_index,
            correlation_id: None,
            outcomes,
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Map final lifecycle states back onto the batch's resources.
    ///
    /// Resources pair with operation handles positionally (one handle per
    /// resource in the happy path). A resource with no handle is recorded as
    /// `SubmissionFailed`; a non-terminal lifecycle is recorded as `TimedOut`
    /// with its last observed state.
    pub fn from_lifecycles(
        batch_index: usize,
        correlation_id: CorrelationId,
        resources: Vec<ResourceId>,
        operations: &[OperationId],
        lifecycles: &HashMap<OperationId, ResourceLifecycle>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let outcomes = resources
            .into_iter()
            .enumerate()
            .map(|(i, resource_id)| {
                let lifecycle = operations.get(i).and_then(|op| lifecycles.get(op)).copied();
                match lifecycle {
                    Some(ResourceLifecycle::Succeeded) => ResourceOutcome {
                        resource_id,
                        state: OutcomeState::Succeeded,
                        detail: None,
                    },
                    Some(ResourceLifecycle::Failed) => ResourceOutcome {
                        resource_id,
                        state: OutcomeState::Failed,
                        detail: Some("remote operation reported failure".to_string()),
                    },
                    Some(lifecycle) => ResourceOutcome {
                        resource_id,
                        state: OutcomeState::TimedOut,
                        detail: Some(format!("stopped waiting in state {lifecycle}")),
                    },
                    None => ResourceOutcome {
                        resource_id,
                        state: OutcomeState::SubmissionFailed,
                        detail: Some("no operation handle returned for resource".to_string()),
                    },
                }
            })
            .collect();

        Self {
            batch_index,
            correlation_id: Some(correlation_id),
            outcomes,
            started_at,
            completed_at: Utc::now(),
        }
    }
}

/// Aggregate result across all batches of one orchestration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub total_resources: usize,
    pub succeeded: usize,
    /// Every resource that did not reach `Succeeded`, with its last known
    /// state.
    pub unsuccessful: Vec<ResourceOutcome>,
    pub batches: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl OrchestrationResult {
    /// Succeeded only if every batch succeeded.
    pub fn is_success(&self) -> bool {
        self.unsuccessful.is_empty()
    }

    /// Fold per-batch results into a run-level aggregate.
    ///
    /// The fold is commutative over batch results: tallies and the
    /// unsuccessful set do not depend on batch completion order.
    pub fn aggregate(batch_results: Vec<BatchResult>, started_at: DateTime<Utc>) -> Self {
        let batches = batch_results.len();
        let mut total_resources = 0;
        let mut succeeded = 0;
        let mut unsuccessful = Vec::new();

        for batch in batch_results {
            for outcome in batch.outcomes {
                total_resources += 1;
                if outcome.state == OutcomeState::Succeeded {
                    succeeded += 1;
                } else {
                    unsuccessful.push(outcome);
                }
            }
        }

        Self {
            total_resources,
            succeeded,
            unsuccessful,
            batches,
            started_at,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, state: OutcomeState) -> ResourceOutcome {
        ResourceOutcome {
            resource_id: ResourceId::new(id),
            state,
            detail: None,
        }
    }

    fn batch_of(index: usize, outcomes: Vec<ResourceOutcome>) -> BatchResult {
        BatchResult {
            batch_index: index,
            correlation_id: Some(CorrelationId::new()),
            outcomes,
            started_at: Utc::now(),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn correlation_ids_are_unique_per_request() {
        let first = ActionRequest::new(vec![ResourceId::new("vm-1")], ActionParameters::default());
        let second = ActionRequest::new(vec![ResourceId::new("vm-1")], ActionParameters::default());
        assert_ne!(first.correlation_id, second.correlation_id);
    }

    #[test]
    fn operation_state_terminality() {
        assert!(OperationState::Succeeded.is_terminal());
        assert!(OperationState::Failed.is_terminal());
        assert!(!OperationState::Pending.is_terminal());
        assert!(!OperationState::Running.is_terminal());
        assert!(!OperationState::Unknown.is_terminal());
    }

    #[test]
    fn unrecognized_wire_state_deserializes_to_unknown() {
        let state: OperationState = serde_json::from_str("\"provisioning\"").unwrap();
        assert_eq!(state, OperationState::Unknown);
    }

    #[test]
    fn batch_success_requires_every_outcome_succeeded() {
        let good = batch_of(0, vec![outcome("a", OutcomeState::Succeeded)]);
        assert!(good.is_success());

        let mixed = batch_of(
            1,
            vec![
                outcome("a", OutcomeState::Succeeded),
                outcome("b", OutcomeState::Failed),
            ],
        );
        assert!(!mixed.is_success());
    }

    #[test]
    fn submission_failed_marks_every_resource() {
        let result = BatchResult::submission_failed(
            3,
            vec![ResourceId::new("a"), ResourceId::new("b")],
            "endpoint rejected request".to_string(),
            Utc::now(),
        );
        assert_eq!(result.outcomes.len(), 2);
        assert!(result
            .outcomes
            .iter()
            .all(|o| o.state == OutcomeState::SubmissionFailed));
        assert!(result.correlation_id.is_none());
    }

    #[test]
    fn from_lifecycles_maps_terminal_and_stuck_states() {
        let resources = vec![
            ResourceId::new("a"),
            ResourceId::new("b"),
            ResourceId::new("c"),
        ];
        let operations = vec![OperationId("op-0".to_string()), OperationId("op-1".to_string())];
        let mut lifecycles = HashMap::new();
        lifecycles.insert(operations[0].clone(), ResourceLifecycle::Succeeded);
        lifecycles.insert(operations[1].clone(), ResourceLifecycle::Running);

        let result = BatchResult::from_lifecycles(
            0,
            CorrelationId::new(),
            resources,
            &operations,
            &lifecycles,
            Utc::now(),
        );

        assert_eq!(result.outcomes[0].state, OutcomeState::Succeeded);
        assert_eq!(result.outcomes[1].state, OutcomeState::TimedOut);
        // Third resource had no operation handle at all.
        assert_eq!(result.outcomes[2].state, OutcomeState::SubmissionFailed);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let first = batch_of(
            0,
            vec![
                outcome("a", OutcomeState::Succeeded),
                outcome("b", OutcomeState::Failed),
            ],
        );
        let second = batch_of(
            1,
            vec![
                outcome("c", OutcomeState::TimedOut),
                outcome("d", OutcomeState::Succeeded),
            ],
        );

        let forward =
            OrchestrationResult::aggregate(vec![first.clone(), second.clone()], Utc::now());
        let reverse = OrchestrationResult::aggregate(vec![second, first], Utc::now());

        assert_eq!(forward.total_resources, reverse.total_resources);
        assert_eq!(forward.succeeded, reverse.succeeded);

        let mut forward_ids: Vec<_> = forward
            .unsuccessful
            .iter()
            .map(|o| o.resource_id.clone())
            .collect();
        let mut reverse_ids: Vec<_> = reverse
            .unsuccessful
            .iter()
            .map(|o| o.resource_id.clone())
            .collect();
        forward_ids.sort();
        reverse_ids.sort();
        assert_eq!(forward_ids, reverse_ids);
    }
}
