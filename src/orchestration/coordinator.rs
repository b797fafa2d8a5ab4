//! # Bulk Orchestrator
//!
//! Coordinates Batcher -> Dispatcher -> Tracker: one concurrent task per
//! batch, a join barrier that waits for every task regardless of individual
//! failure, then an order-independent fold into the run result.
//!
//! The orchestrator performs no remote calls itself and holds no shared
//! mutable state: each batch task resolves to its own `BatchResult` slot,
//! merged after the join.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{error, info, instrument};

use crate::batch::batch_resources;
use crate::config::OrchestratorConfig;
use crate::error::Result;
use crate::orchestration::dispatcher::Dispatcher;
use crate::orchestration::errors::OrchestrationError;
use crate::orchestration::tracker::{OperationTracker, PollOutcome};
use crate::orchestration::types::{
    ActionParameters, BatchResult, OrchestrationResult, ResourceId,
};
use crate::services::{ExecutionService, StatusService};

/// Orchestrates one bulk action across an arbitrary number of resources.
///
/// Built once from an explicit configuration object plus the two remote
/// service handles; no process-wide singletons. The same orchestrator may run
/// any number of `execute` calls.
#[derive(Debug)]
pub struct BulkOrchestrator<E, S> {
    config: OrchestratorConfig,
    execution: Arc<E>,
    status: Arc<S>,
}

impl<E, S> BulkOrchestrator<E, S>
where
    E: ExecutionService + 'static,
    S: StatusService + 'static,
{
    /// Validates the configuration up front; configuration errors are the
    /// only fatal errors in this system.
    pub fn new(config: OrchestratorConfig, execution: Arc<E>, status: Arc<S>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            execution,
            status,
        })
    }

    /// Run one bulk action over `identifiers`.
    ///
    /// Batches the identifiers, launches one task per batch (submit then
    /// poll), joins all tasks, and aggregates. A batch's submission failure,
    /// operation failure, or timeout never cancels sibling batches; every
    /// identifier that did not reach `Succeeded` is listed in the result with
    /// its last known state.
    #[instrument(level = "info", skip(self, identifiers, parameters), fields(
        resources = identifiers.len(),
        batch_size = self.config.batch_size,
    ))]
    pub async fn execute(
        &self,
        identifiers: Vec<ResourceId>,
        parameters: ActionParameters,
    ) -> Result<OrchestrationResult> {
        let started_at = Utc::now();
        let batches = batch_resources(&identifiers, self.config.batch_size)?;

        info!(batches = batches.len(), "starting bulk orchestration");

        let mut handles = Vec::with_capacity(batches.len());
        // Retained copies so a panicked task can still be reported against
        // its identifiers.
        let mut batch_snapshots = Vec::with_capacity(batches.len());

        for (batch_index, batch) in batches.into_iter().enumerate() {
            batch_snapshots.push(batch.clone());

            let dispatcher =
                Dispatcher::new(Arc::clone(&self.execution), parameters.clone());
            let tracker = OperationTracker::new(
                Arc::clone(&self.status),
                self.config.poll_interval,
                self.config.operation_timeout,
            );

            handles.push(tokio::spawn(run_batch(
                batch_index,
                batch,
                dispatcher,
                tracker,
            )));
        }

        // Join barrier: aggregation starts only after every task returned.
        let joined = join_all(handles).await;

        let mut batch_results = Vec::with_capacity(joined.len());
        for (batch_index, join_result) in joined.into_iter().enumerate() {
            match join_result {
                Ok(result) => batch_results.push(result),
                Err(join_error) => {
                    let panic = OrchestrationError::TaskPanicked {
                        batch_index,
                        message: join_error.to_string(),
                    };
                    error!(batch_index, error = %panic, "batch task did not complete");
                    batch_results.push(BatchResult::submission_failed(
                        batch_index,
                        batch_snapshots[batch_index].clone(),
                        panic.to_string(),
                        started_at,
                    ));
                }
            }
        }

        let result = OrchestrationResult::aggregate(batch_results, started_at);
        info!(
            total = result.total_resources,
            succeeded = result.succeeded,
            unsuccessful = result.unsuccessful.len(),
            "bulk orchestration finished"
        );

        Ok(result)
    }
}

/// One batch's end-to-end task: submit, then poll to completion or deadline.
///
/// Submission must complete before polling begins; a submission failure short
/// circuits into a batch-wide `SubmissionFailed` result.
async fn run_batch<E, S>(
    batch_index: usize,
    resources: Vec<ResourceId>,
    dispatcher: Dispatcher<E>,
    tracker: OperationTracker<S>,
) -> BatchResult
where
    E: ExecutionService,
    S: StatusService,
{
    let started_at = Utc::now();

    let submission = match dispatcher.submit(&resources).await {
        Ok(submission) => submission,
        Err(error) => {
            return BatchResult::submission_failed(
                batch_index,
                resources,
                error.to_string(),
                started_at,
            );
        }
    };

    // Non-terminal lifecycles in the map are exactly the timed-out handles,
    // so both outcomes fold the same way.
    let lifecycles = match tracker.await_completion(&submission.operations).await {
        PollOutcome::Complete { lifecycles } | PollOutcome::TimedOut { lifecycles } => lifecycles,
    };

    BatchResult::from_lifecycles(
        batch_index,
        submission.correlation_id,
        resources,
        &submission.operations,
        &lifecycles,
        started_at,
    )
}
