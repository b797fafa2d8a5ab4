//! # Remote Service Contracts
//!
//! The cloud provider's management surface, expressed as narrow async traits.
//! The orchestration core consumes [`ExecutionService`] and [`StatusService`];
//! [`ProvisioningService`] and [`InventoryService`] only set up preconditions
//! (fleet creation, resource listing) and sit outside the core loop.
//!
//! No vendor schema appears here. A real deployment implements these traits
//! over its provider SDK; tests and the demo binary use the in-memory
//! [`simulator::SimulatedFleet`].

pub mod execution;
pub mod provisioning;
pub mod simulator;
pub mod status;

use thiserror::Error;

pub use execution::ExecutionService;
pub use provisioning::{
    CapacityType, FleetSpec, InventoryService, ProvisioningHandle, ProvisioningService,
};
pub use simulator::{SimulatedFleet, SubmissionRecord};
pub use status::{OperationStatus, StatusService};

/// Errors raised by remote service implementations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The endpoint rejected the request outright.
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// Transient failure reaching or querying the endpoint.
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    /// The endpoint answered with something the caller cannot interpret.
    #[error("Malformed service response: {message}")]
    Protocol { message: String },
}
