//! Partial-failure semantics: a batch's submission failure, operation
//! failure, or timeout is isolated to that batch while siblings run to
//! completion, and every unsuccessful identifier is enumerated in the result.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use bulkflow_core::config::OrchestratorConfig;
use bulkflow_core::orchestration::{ActionParameters, BulkOrchestrator, OutcomeState};
use bulkflow_core::services::SimulatedFleet;

fn test_config(batch_size: usize, timeout: Duration) -> OrchestratorConfig {
    OrchestratorConfig {
        batch_size,
        poll_interval: Duration::from_secs(30),
        operation_timeout: timeout,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn rejected_submission_only_fails_its_own_batch() {
    let fleet = Arc::new(SimulatedFleet::new());
    let resources = fleet.seed_resources("ba-reject", 500);

    // Poison one resource in the second batch; the whole submission
    // containing it is refused.
    fleet.reject_submissions_containing(&resources[120]);

    let orchestrator = BulkOrchestrator::new(
        test_config(100, Duration::from_secs(600)),
        Arc::clone(&fleet),
        Arc::clone(&fleet),
    )
    .unwrap();
    let result = orchestrator
        .execute(resources.clone(), ActionParameters { force: true })
        .await
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(result.total_resources, 500);
    assert_eq!(result.succeeded, 400);
    assert_eq!(result.unsuccessful.len(), 100);

    // The unsuccessful set is exactly the second batch.
    let expected: HashSet<_> = resources[100..200].iter().cloned().collect();
    let actual: HashSet<_> = result
        .unsuccessful
        .iter()
        .map(|o| o.resource_id.clone())
        .collect();
    assert_eq!(actual, expected);
    assert!(result
        .unsuccessful
        .iter()
        .all(|o| o.state == OutcomeState::SubmissionFailed));

    // Only four submissions were accepted.
    assert_eq!(fleet.submissions().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn stuck_batch_times_out_while_siblings_succeed() {
    let fleet = Arc::new(SimulatedFleet::new());
    let resources = fleet.seed_resources("ba-stuck", 150);

    // Second batch never reaches a terminal state.
    for resource in &resources[50..100] {
        fleet.stall_resource(resource);
    }

    let orchestrator = BulkOrchestrator::new(
        test_config(50, Duration::from_secs(90)),
        Arc::clone(&fleet),
        Arc::clone(&fleet),
    )
    .unwrap();

    let started = tokio::time::Instant::now();
    let result = orchestrator
        .execute(resources.clone(), ActionParameters::default())
        .await
        .unwrap();

    // The run ends within the deadline plus one poll interval.
    let elapsed = started.elapsed();
    assert!(elapsed <= Duration::from_secs(90 + 30 + 1));

    assert_eq!(result.succeeded, 100);
    assert_eq!(result.unsuccessful.len(), 50);
    let expected: HashSet<_> = resources[50..100].iter().cloned().collect();
    let actual: HashSet<_> = result
        .unsuccessful
        .iter()
        .map(|o| o.resource_id.clone())
        .collect();
    assert_eq!(actual, expected);
    assert!(result
        .unsuccessful
        .iter()
        .all(|o| o.state == OutcomeState::TimedOut));
}

#[tokio::test(start_paused = true)]
async fn failed_operations_are_enumerated_with_their_state() {
    let fleet = Arc::new(SimulatedFleet::new());
    let resources = fleet.seed_resources("ba-fail", 80);

    fleet.fail_resource(&resources[7]);
    fleet.fail_resource(&resources[42]);

    let orchestrator = BulkOrchestrator::new(
        test_config(40, Duration::from_secs(600)),
        Arc::clone(&fleet),
        Arc::clone(&fleet),
    )
    .unwrap();
    let result = orchestrator
        .execute(resources.clone(), ActionParameters::default())
        .await
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(result.succeeded, 78);
    assert_eq!(result.unsuccessful.len(), 2);
    assert!(result
        .unsuccessful
        .iter()
        .all(|o| o.state == OutcomeState::Failed));

    let failed: HashSet<_> = result
        .unsuccessful
        .iter()
        .map(|o| o.resource_id.clone())
        .collect();
    assert!(failed.contains(&resources[7]));
    assert!(failed.contains(&resources[42]));
}

// Aggregate correctness does not depend on which batch finishes first; mixed
// fast and slow batches produce the same tallies as a uniform run.
#[tokio::test(start_paused = true)]
async fn mixed_completion_speeds_do_not_change_the_aggregate() {
    let fleet = Arc::new(SimulatedFleet::new().with_polls_until_done(3));
    let resources = fleet.seed_resources("ba-mixed", 300);

    let orchestrator = BulkOrchestrator::new(
        test_config(50, Duration::from_secs(600)),
        Arc::clone(&fleet),
        Arc::clone(&fleet),
    )
    .unwrap();
    let result = orchestrator
        .execute(resources, ActionParameters::default())
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.batches, 6);
    assert_eq!(result.total_resources, 300);
    assert_eq!(result.succeeded, 300);
}
