//! End-to-end demonstration against the in-memory simulator.
//!
//! Mirrors a realistic bulk lifecycle session: provision three compute
//! fleets, then bulk-delete the first fleet, half of the second, and finally
//! everything left, reporting partial completion at each step.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use bulkflow_core::config::OrchestratorConfig;
use bulkflow_core::logging::init_structured_logging;
use bulkflow_core::orchestration::{ActionParameters, BulkOrchestrator, OrchestrationResult};
use bulkflow_core::services::{
    CapacityType, FleetSpec, InventoryService, ProvisioningService, SimulatedFleet,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_structured_logging();

    let mut config = OrchestratorConfig::from_env()?;
    // The simulator resolves operations quickly; no need for the production
    // 30 second cadence here.
    config.poll_interval = Duration::from_millis(100);

    let fleet = Arc::new(SimulatedFleet::new());

    provision(
        &fleet,
        FleetSpec {
            name: "ba-1k-instances".to_string(),
            capacity_type: CapacityType::Instances,
            spot_capacity: 0,
            regular_capacity: 1000,
            size_profiles: vec![
                "standard-f1s".to_string(),
                "standard-ds1-v2".to_string(),
                "standard-d2ads-v5".to_string(),
                "standard-d8as-v5".to_string(),
            ],
        },
    )
    .await?;

    provision(
        &fleet,
        FleetSpec {
            name: "ba-1k-vcpus".to_string(),
            capacity_type: CapacityType::VCpus,
            spot_capacity: 0,
            regular_capacity: 1000,
            size_profiles: vec![
                "standard-f2s".to_string(),
                "standard-ds2-v2".to_string(),
                "standard-e2s-v3".to_string(),
                "standard-d2as-v4".to_string(),
            ],
        },
    )
    .await?;

    provision(
        &fleet,
        FleetSpec {
            name: "ba-2k-spot-vcpus".to_string(),
            capacity_type: CapacityType::VCpus,
            spot_capacity: 2000,
            regular_capacity: 0,
            size_profiles: Vec::new(),
        },
    )
    .await?;

    let orchestrator =
        BulkOrchestrator::new(config, Arc::clone(&fleet), Arc::clone(&fleet))?;
    let parameters = ActionParameters { force: true };

    // Delete every resource in the first fleet.
    let first = fleet.list_fleet_resources("ba-1k-instances").await?;
    info!(resources = first.len(), fleet = "ba-1k-instances", "bulk deleting fleet");
    report(&orchestrator.execute(first, parameters.clone()).await?);

    // Delete half of the second fleet.
    let second = fleet.list_fleet_resources("ba-1k-vcpus").await?;
    let half = second[..second.len() / 2].to_vec();
    info!(resources = half.len(), fleet = "ba-1k-vcpus", "bulk deleting half of fleet");
    report(&orchestrator.execute(half, parameters.clone()).await?);

    // Delete everything that remains.
    let remaining = fleet.list_all_resources().await?;
    info!(resources = remaining.len(), "bulk deleting remaining resources");
    report(&orchestrator.execute(remaining, parameters).await?);

    info!(
        remaining = fleet.remaining_resources(),
        "demo complete"
    );
    Ok(())
}

/// Begin fleet creation and poll the long-running operation to completion.
async fn provision(fleet: &Arc<SimulatedFleet>, spec: FleetSpec) -> Result<()> {
    info!(fleet = %spec.name, "creating fleet");
    let handle = fleet.begin_create_fleet(&spec).await?;

    loop {
        let state = fleet.poll_provisioning(&handle).await?;
        info!(fleet = %spec.name, state = %state, "fleet provisioning");
        if state.is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    Ok(())
}

fn report(result: &OrchestrationResult) {
    info!(
        batches = result.batches,
        total = result.total_resources,
        succeeded = result.succeeded,
        unsuccessful = result.unsuccessful.len(),
        "bulk action finished"
    );
    for outcome in &result.unsuccessful {
        info!(
            resource = %outcome.resource_id,
            state = %outcome.state,
            detail = outcome.detail.as_deref().unwrap_or(""),
            "resource did not succeed"
        );
    }
}
