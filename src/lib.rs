#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Bulkflow Core
//!
//! Bulk asynchronous resource-lifecycle orchestration: submit a bulk action
//! over a large set of resource identifiers, batch it, track it via
//! correlation and operation identifiers, and poll to completion with partial
//! completion semantics.
//!
//! ## Overview
//!
//! The hard part of bulk lifecycle management — fleet scheduling, capacity
//! allocation, distributed operation tracking — lives behind the remote
//! service boundary. This crate implements the coordination pattern in front
//! of it: fixed-size batching, one concurrent dispatch-and-poll task per
//! batch, a join barrier that waits for every batch regardless of individual
//! failure, and an aggregate result listing every identifier that did not
//! reach a successful terminal state.
//!
//! ## Module Organization
//!
//! - [`batch`] - Pure batching of identifier sequences
//! - [`orchestration`] - Dispatcher, tracker, lifecycle, and coordinator
//! - [`services`] - Abstract remote service contracts plus an in-memory simulator
//! - [`config`] - Construction-time configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured tracing initialization
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bulkflow_core::config::OrchestratorConfig;
//! use bulkflow_core::orchestration::{ActionParameters, BulkOrchestrator};
//! use bulkflow_core::services::SimulatedFleet;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fleet = Arc::new(SimulatedFleet::new());
//! let resources = fleet.seed_resources("demo", 1000);
//!
//! let orchestrator = BulkOrchestrator::new(
//!     OrchestratorConfig::default(),
//!     Arc::clone(&fleet),
//!     Arc::clone(&fleet),
//! )?;
//!
//! let result = orchestrator
//!     .execute(resources, ActionParameters { force: true })
//!     .await?;
//! println!("{} of {} succeeded", result.succeeded, result.total_resources);
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Semantics
//!
//! Only configuration errors are fatal. A batch's submission failure,
//! operation failure, or timeout is isolated to that batch and reported in
//! the final [`orchestration::OrchestrationResult`]; sibling batches always
//! run to completion. Timeout means "stop waiting", never "undo" — there is
//! no mechanism to cancel an already-submitted remote action.

pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod orchestration;
pub mod services;

pub use batch::batch_resources;
pub use config::OrchestratorConfig;
pub use error::{BulkflowError, Result};
pub use orchestration::{
    ActionParameters, BatchResult, BulkOrchestrator, CorrelationId, OperationId, OperationState,
    OrchestrationResult, OutcomeState, ResourceId, ResourceOutcome,
};
pub use services::{ExecutionService, StatusService};
