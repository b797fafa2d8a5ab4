//! # In-Memory Fleet Simulator
//!
//! Implements every remote service trait against in-memory tables, for tests
//! and the demo binary. Behavior knobs cover the failure modes the
//! orchestrator must isolate: rejected submissions, operations that resolve to
//! failure, and operations that never reach a terminal state.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::orchestration::types::{
    ActionParameters, CorrelationId, OperationId, OperationState, ResourceId,
};
use crate::services::provisioning::{
    FleetSpec, InventoryService, ProvisioningHandle, ProvisioningService,
};
use crate::services::status::OperationStatus;
use crate::services::{ExecutionService, ServiceError, StatusService};

/// One accepted bulk-action submission, recorded for test assertions.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub correlation_id: CorrelationId,
    pub resource_ids: Vec<ResourceId>,
    pub parameters: ActionParameters,
}

#[derive(Debug)]
struct OperationRecord {
    resource: ResourceId,
    polls_seen: u32,
}

#[derive(Debug, Default)]
struct SimulatorState {
    /// Resources per fleet, in creation order.
    fleets: HashMap<String, Vec<ResourceId>>,
    /// All live resources, in creation order; shrinks as deletions succeed.
    inventory: Vec<ResourceId>,
    operations: HashMap<OperationId, OperationRecord>,
    submissions: Vec<SubmissionRecord>,
    provisionings: HashMap<ProvisioningHandle, String>,
    rejected: HashSet<ResourceId>,
    failing: HashSet<ResourceId>,
    stuck: HashSet<ResourceId>,
    next_operation: u64,
}

/// Shared in-memory simulator. Clone-free sharing via `Arc`; all mutation goes
/// through one mutex, never held across an await point.
#[derive(Debug)]
pub struct SimulatedFleet {
    state: Arc<Mutex<SimulatorState>>,
    /// Polls an operation needs before reporting a terminal state.
    polls_until_done: u32,
}

impl SimulatedFleet {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimulatorState::default())),
            polls_until_done: 1,
        }
    }

    /// Require `polls` status queries before an operation turns terminal.
    pub fn with_polls_until_done(mut self, polls: u32) -> Self {
        self.polls_until_done = polls.max(1);
        self
    }

    /// Reject any submission whose batch contains `resource`.
    pub fn reject_submissions_containing(&self, resource: &ResourceId) {
        self.state.lock().unwrap().rejected.insert(resource.clone());
    }

    /// Resolve `resource`'s operation to `Failed` instead of `Succeeded`.
    pub fn fail_resource(&self, resource: &ResourceId) {
        self.state.lock().unwrap().failing.insert(resource.clone());
    }

    /// Keep `resource`'s operation non-terminal forever.
    pub fn stall_resource(&self, resource: &ResourceId) {
        self.state.lock().unwrap().stuck.insert(resource.clone());
    }

    /// Seed `count` resources into `fleet` without going through
    /// provisioning. Returns the identifiers in creation order.
    pub fn seed_resources(&self, fleet: &str, count: usize) -> Vec<ResourceId> {
        let mut state = self.state.lock().unwrap();
        let ids: Vec<ResourceId> = (0..count)
            .map(|i| ResourceId::new(format!("/fleets/{fleet}/vm-{i:04}")))
            .collect();
        state.inventory.extend(ids.iter().cloned());
        state
            .fleets
            .entry(fleet.to_string())
            .or_default()
            .extend(ids.iter().cloned());
        ids
    }

    /// Accepted submissions so far, in order.
    pub fn submissions(&self) -> Vec<SubmissionRecord> {
        self.state.lock().unwrap().submissions.clone()
    }

    /// Number of resources still live.
    pub fn remaining_resources(&self) -> usize {
        self.state.lock().unwrap().inventory.len()
    }
}

impl Default for SimulatedFleet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutionService for SimulatedFleet {
    async fn submit_bulk_action(
        &self,
        resource_ids: &[ResourceId],
        correlation_id: &CorrelationId,
        parameters: &ActionParameters,
    ) -> Result<Vec<OperationId>, ServiceError> {
        let mut state = self.state.lock().unwrap();

        if let Some(rejected) = resource_ids.iter().find(|id| state.rejected.contains(id)) {
            return Err(ServiceError::Rejected {
                message: format!("bulk action refused: resource {rejected} is not deletable"),
            });
        }

        state.submissions.push(SubmissionRecord {
            correlation_id: *correlation_id,
            resource_ids: resource_ids.to_vec(),
            parameters: parameters.clone(),
        });

        let operations: Vec<OperationId> = resource_ids
            .iter()
            .map(|resource| {
                let id = OperationId(format!("op-{:06}", state.next_operation));
                state.next_operation += 1;
                state.operations.insert(
                    id.clone(),
                    OperationRecord {
                        resource: resource.clone(),
                        polls_seen: 0,
                    },
                );
                id
            })
            .collect();

        debug!(
            correlation_id = %correlation_id,
            resources = resource_ids.len(),
            "simulated bulk action accepted"
        );

        Ok(operations)
    }
}

#[async_trait]
impl StatusService for SimulatedFleet {
    async fn get_operation_status(
        &self,
        operation_ids: &[OperationId],
        _correlation_id: &CorrelationId,
    ) -> Result<Vec<OperationStatus>, ServiceError> {
        let mut state = self.state.lock().unwrap();
        let polls_until_done = self.polls_until_done;

        let mut statuses = Vec::with_capacity(operation_ids.len());
        let mut completed: Vec<ResourceId> = Vec::new();

        for id in operation_ids {
            let Some((resource, polls_seen)) = state.operations.get_mut(id).map(|record| {
                record.polls_seen += 1;
                (record.resource.clone(), record.polls_seen)
            }) else {
                statuses.push(OperationStatus {
                    operation_id: id.clone(),
                    state: OperationState::Unknown,
                    error: Some("operation not found".to_string()),
                });
                continue;
            };

            let op_state = if state.stuck.contains(&resource) || polls_seen < polls_until_done {
                OperationState::Running
            } else if state.failing.contains(&resource) {
                OperationState::Failed
            } else {
                completed.push(resource.clone());
                OperationState::Succeeded
            };

            statuses.push(OperationStatus {
                operation_id: id.clone(),
                state: op_state,
                error: (op_state == OperationState::Failed)
                    .then(|| "simulated operation failure".to_string()),
            });
        }

        // Deletion semantics: a succeeded operation removes its resource.
        for resource in completed {
            state.inventory.retain(|r| r != &resource);
            for fleet in state.fleets.values_mut() {
                fleet.retain(|r| r != &resource);
            }
        }

        Ok(statuses)
    }
}

#[async_trait]
impl ProvisioningService for SimulatedFleet {
    async fn begin_create_fleet(
        &self,
        spec: &FleetSpec,
    ) -> Result<ProvisioningHandle, ServiceError> {
        let mut state = self.state.lock().unwrap();
        if state.fleets.contains_key(&spec.name) {
            return Err(ServiceError::Rejected {
                message: format!("fleet {} already exists", spec.name),
            });
        }

        let capacity = (spec.spot_capacity + spec.regular_capacity) as usize;
        let ids: Vec<ResourceId> = (0..capacity)
            .map(|i| ResourceId::new(format!("/fleets/{}/vm-{i:04}", spec.name)))
            .collect();
        state.inventory.extend(ids.iter().cloned());
        state.fleets.insert(spec.name.clone(), ids);

        let handle = ProvisioningHandle(format!("prov-{}", spec.name));
        state.provisionings.insert(handle.clone(), spec.name.clone());

        debug!(fleet = %spec.name, capacity, "simulated fleet provisioning started");
        Ok(handle)
    }

    async fn poll_provisioning(
        &self,
        handle: &ProvisioningHandle,
    ) -> Result<OperationState, ServiceError> {
        let state = self.state.lock().unwrap();
        if state.provisionings.contains_key(handle) {
            // Fleet creation resolves on first poll in the simulator.
            Ok(OperationState::Succeeded)
        } else {
            Err(ServiceError::Protocol {
                message: format!("unknown provisioning handle {handle}"),
            })
        }
    }
}

#[async_trait]
impl InventoryService for SimulatedFleet {
    async fn list_fleet_resources(&self, fleet: &str) -> Result<Vec<ResourceId>, ServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.fleets.get(fleet).cloned().unwrap_or_default())
    }

    async fn list_all_resources(&self) -> Result<Vec<ResourceId>, ServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.inventory.clone())
    }
}
