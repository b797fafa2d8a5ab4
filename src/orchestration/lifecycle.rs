//! # Resource Lifecycle
//!
//! Local view of one resource's journey through a bulk action:
//!
//! ```text
//! Unsubmitted -> Submitted -> {Pending | Running} -> {Succeeded | Failed | TimedOut}
//! ```
//!
//! `Submitted` is entered when the batch's action request is accepted by the
//! remote endpoint, not when locally enqueued. `TimedOut` is local-only: the
//! remote operation may still be running, the orchestrator simply stopped
//! waiting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::orchestration::types::OperationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceLifecycle {
    /// Not yet part of an accepted action request.
    Unsubmitted,
    /// Action request accepted; no state reported yet.
    Submitted,
    /// Remote operation queued.
    Pending,
    /// Remote operation executing.
    Running,
    /// Remote operation finished successfully.
    Succeeded,
    /// Remote operation finished in failure.
    Failed,
    /// Locally declared: the tracker's deadline elapsed first.
    TimedOut,
}

impl ResourceLifecycle {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::TimedOut)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: Self) -> bool {
        match self {
            Self::Unsubmitted => matches!(next, Self::Submitted),
            Self::Submitted => matches!(
                next,
                Self::Pending | Self::Running | Self::Succeeded | Self::Failed | Self::TimedOut
            ),
            Self::Pending => {
                matches!(next, Self::Running | Self::Succeeded | Self::Failed | Self::TimedOut)
            }
            Self::Running => matches!(next, Self::Succeeded | Self::Failed | Self::TimedOut),
            Self::Succeeded | Self::Failed | Self::TimedOut => false,
        }
    }

    /// Fold a remotely observed operation state into this lifecycle.
    ///
    /// Terminal lifecycles absorb further observations, so a handle is never
    /// advanced past its terminal state even though the tracker keeps polling
    /// the whole batch. Unrecognized and regressive observations (e.g. a
    /// `Pending` report after `Running`) leave the lifecycle unchanged.
    pub fn observe(self, state: OperationState) -> Self {
        if self.is_terminal() {
            return self;
        }

        let next = match state {
            OperationState::Pending => Self::Pending,
            OperationState::Running => Self::Running,
            OperationState::Succeeded => Self::Succeeded,
            OperationState::Failed => Self::Failed,
            OperationState::Unknown => return self,
        };

        if next == self || self.can_transition_to(next) {
            next
        } else {
            self
        }
    }
}

impl fmt::Display for ResourceLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsubmitted => write!(f, "unsubmitted"),
            Self::Submitted => write!(f, "submitted"),
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timed_out"),
        }
    }
}
