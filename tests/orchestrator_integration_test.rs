//! Orchestrator integration tests against the in-memory simulator: batching
//! fan-out, partition invariants, and end-to-end success reporting.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use bulkflow_core::config::OrchestratorConfig;
use bulkflow_core::orchestration::{ActionParameters, BulkOrchestrator};
use bulkflow_core::services::SimulatedFleet;
use bulkflow_core::BulkflowError;

fn test_config(batch_size: usize) -> OrchestratorConfig {
    OrchestratorConfig {
        batch_size,
        poll_interval: Duration::from_secs(1),
        operation_timeout: Duration::from_secs(60),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn thousand_resources_fan_out_into_ten_batches() {
    let fleet = Arc::new(SimulatedFleet::new());
    let resources = fleet.seed_resources("ba-1k", 1000);

    let orchestrator =
        BulkOrchestrator::new(test_config(100), Arc::clone(&fleet), Arc::clone(&fleet)).unwrap();
    let result = orchestrator
        .execute(resources.clone(), ActionParameters { force: true })
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.batches, 10);
    assert_eq!(result.total_resources, 1000);
    assert_eq!(result.succeeded, 1000);
    assert!(result.unsuccessful.is_empty());

    // Exactly one submission per batch, each within the size limit.
    let submissions = fleet.submissions();
    assert_eq!(submissions.len(), 10);
    assert!(submissions.iter().all(|s| s.resource_ids.len() <= 100));

    // Every input identifier appears in exactly one submission.
    let mut seen = HashSet::new();
    for submission in &submissions {
        for id in &submission.resource_ids {
            assert!(seen.insert(id.clone()), "identifier {id} submitted twice");
        }
    }
    assert_eq!(seen.len(), resources.len());

    // Correlation identifiers are unique per submission.
    let correlations: HashSet<_> = submissions.iter().map(|s| s.correlation_id).collect();
    assert_eq!(correlations.len(), submissions.len());

    // Deletion semantics: nothing remains in the simulated inventory.
    assert_eq!(fleet.remaining_resources(), 0);
}

#[tokio::test(start_paused = true)]
async fn operations_needing_several_polls_still_converge() {
    let fleet = Arc::new(SimulatedFleet::new().with_polls_until_done(4));
    let resources = fleet.seed_resources("ba-slow", 100);

    let orchestrator =
        BulkOrchestrator::new(test_config(30), Arc::clone(&fleet), Arc::clone(&fleet)).unwrap();
    let result = orchestrator
        .execute(resources, ActionParameters::default())
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.batches, 4);
    assert_eq!(result.succeeded, 100);
}

#[tokio::test]
async fn empty_input_completes_with_zero_batches() {
    let fleet = Arc::new(SimulatedFleet::new());
    let orchestrator =
        BulkOrchestrator::new(test_config(100), Arc::clone(&fleet), Arc::clone(&fleet)).unwrap();

    let result = orchestrator
        .execute(Vec::new(), ActionParameters::default())
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.batches, 0);
    assert_eq!(result.total_resources, 0);
    assert!(fleet.submissions().is_empty());
}

#[tokio::test]
async fn zero_batch_size_is_a_fatal_configuration_error() {
    let fleet = Arc::new(SimulatedFleet::new());
    let err =
        BulkOrchestrator::new(test_config(0), Arc::clone(&fleet), Arc::clone(&fleet)).unwrap_err();
    assert!(matches!(err, BulkflowError::Configuration(_)));
}
