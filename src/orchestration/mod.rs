//! # Orchestration Core
//!
//! Bulk asynchronous resource-lifecycle orchestration: batched dispatch,
//! correlation-tracked polling, and partial completion semantics.
//!
//! ## Core Components
//!
//! - **[`coordinator::BulkOrchestrator`]**: batches input, fans out one task
//!   per batch, joins all tasks, aggregates the run result
//! - **[`dispatcher::Dispatcher`]**: submits one bulk-action request per batch
//!   under a fresh correlation id
//! - **[`tracker::OperationTracker`]**: polls a batch's operations to a
//!   terminal state, bounded by a deadline
//! - **[`lifecycle::ResourceLifecycle`]**: local state machine for one
//!   resource's journey through a bulk action
//!
//! ## Control Flow
//!
//! ```text
//! identifiers ──▶ Batcher ──▶ N tasks: Dispatcher.submit ──▶ Tracker.await_completion
//!                                  │                                  │
//!                                  └──────── join barrier ◀───────────┘
//!                                                │
//!                                       OrchestrationResult
//! ```
//!
//! Per-batch failures are isolated and aggregated, never propagated as an
//! abort of unrelated work.

pub mod coordinator;
pub mod dispatcher;
pub mod errors;
pub mod lifecycle;
pub mod tracker;
pub mod types;

pub use coordinator::BulkOrchestrator;
pub use dispatcher::{Dispatcher, Submission};
pub use errors::OrchestrationError;
pub use lifecycle::ResourceLifecycle;
pub use tracker::{OperationTracker, PollOutcome};
pub use types::{
    ActionParameters, ActionRequest, BatchResult, CorrelationId, OperationId, OperationState,
    OrchestrationResult, OutcomeState, ResourceId, ResourceOutcome,
};
