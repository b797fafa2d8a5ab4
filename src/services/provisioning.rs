//! # Provisioning and Inventory Services
//!
//! Precondition setup for an orchestration run: long-running creation of
//! compute fleets and listing of the resources they produced. These services
//! feed the orchestrator its input; they are not part of the core loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::orchestration::types::{OperationState, ResourceId};
use crate::services::ServiceError;

/// How a fleet's capacity target is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityType {
    /// Target a number of compute instances.
    Instances,
    /// Target a number of virtual CPUs.
    VCpus,
}

/// Request to create a named compute fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSpec {
    pub name: String,
    pub capacity_type: CapacityType,
    pub spot_capacity: u32,
    pub regular_capacity: u32,
    /// Instance size names the fleet may draw from; empty means
    /// attribute-based selection is left to the provider.
    pub size_profiles: Vec<String>,
}

/// Handle for one long-running provisioning operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProvisioningHandle(pub String);

impl std::fmt::Display for ProvisioningHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remote endpoint that creates compute topologies via long-running
/// operations: begin, then poll the returned handle to a terminal state.
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    async fn begin_create_fleet(&self, spec: &FleetSpec)
        -> Result<ProvisioningHandle, ServiceError>;

    async fn poll_provisioning(
        &self,
        handle: &ProvisioningHandle,
    ) -> Result<OperationState, ServiceError>;
}

/// Remote endpoint listing provisioned resources, per fleet or globally.
#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn list_fleet_resources(&self, fleet: &str) -> Result<Vec<ResourceId>, ServiceError>;

    async fn list_all_resources(&self) -> Result<Vec<ResourceId>, ServiceError>;
}
