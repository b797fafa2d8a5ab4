//! # Operation Tracker
//!
//! Polls the status endpoint until every operation in a batch reaches a
//! terminal state or the deadline elapses. The poll loop suspends only its own
//! task between cycles; concurrent trackers for sibling batches are never
//! blocked.
//!
//! Parity note: the whole batch's operation set is queried on every cycle,
//! even once some handles are terminal. Terminal lifecycles absorb repeat
//! observations, so no handle ever advances past its terminal state. Pruning
//! completed handles from later polls is an allowed optimization this
//! implementation deliberately does not take.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, instrument, warn};

use crate::orchestration::errors::OrchestrationError;
use crate::orchestration::lifecycle::ResourceLifecycle;
use crate::orchestration::types::{CorrelationId, OperationId};
use crate::services::{OperationStatus, StatusService};

/// How a tracked batch ended: fully terminal, or cut off by the deadline with
/// whatever states were last observed. Timeout is a reported outcome, never a
/// crash.
#[derive(Debug)]
pub enum PollOutcome {
    Complete {
        lifecycles: HashMap<OperationId, ResourceLifecycle>,
    },
    TimedOut {
        lifecycles: HashMap<OperationId, ResourceLifecycle>,
    },
}

/// Per-batch poller around a shared status service handle.
#[derive(Debug)]
pub struct OperationTracker<S> {
    status: Arc<S>,
    poll_interval: Duration,
    timeout: Duration,
}

impl<S: StatusService> OperationTracker<S> {
    pub fn new(status: Arc<S>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            status,
            poll_interval,
            timeout,
        }
    }

    /// Track `operations` until all are terminal or the deadline elapses.
    ///
    /// Transient status-query failures are logged and retried on the next
    /// cycle, bounded by the same deadline. Each handle starts in the
    /// `Submitted` lifecycle state; the returned map holds the last observed
    /// lifecycle for every handle.
    #[instrument(level = "debug", skip(self, operations), fields(operations = operations.len()))]
    pub async fn await_completion(&self, operations: &[OperationId]) -> PollOutcome {
        let mut lifecycles: HashMap<OperationId, ResourceLifecycle> = operations
            .iter()
            .map(|op| (op.clone(), ResourceLifecycle::Submitted))
            .collect();

        if operations.is_empty() {
            return PollOutcome::Complete { lifecycles };
        }

        let deadline = Instant::now() + self.timeout;

        loop {
            match self.query_once(operations).await {
                Ok(statuses) => {
                    for status in statuses {
                        if let Some(lifecycle) = lifecycles.get_mut(&status.operation_id) {
                            *lifecycle = lifecycle.observe(status.state);
                        }
                    }

                    if lifecycles.values().all(|l| l.is_terminal()) {
                        debug!("all operations reached a terminal state");
                        return PollOutcome::Complete { lifecycles };
                    }
                }
                Err(error) => {
                    warn!(error = %error, "status query failed; retrying next poll cycle");
                }
            }

            if Instant::now() >= deadline {
                let outstanding = lifecycles.values().filter(|l| !l.is_terminal()).count();
                warn!(outstanding, "deadline exceeded; stopped waiting for batch");
                return PollOutcome::TimedOut { lifecycles };
            }

            sleep(self.poll_interval).await;
        }
    }

    /// One status query under a fresh correlation id.
    async fn query_once(
        &self,
        operations: &[OperationId],
    ) -> Result<Vec<OperationStatus>, OrchestrationError> {
        let correlation_id = CorrelationId::new();
        self.status
            .get_operation_status(operations, &correlation_id)
            .await
            .map_err(|e| OrchestrationError::PollingFailed {
                correlation_id,
                message: e.to_string(),
            })
    }
}
