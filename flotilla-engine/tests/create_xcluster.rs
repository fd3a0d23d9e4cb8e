//! Integration tests for replication-config setup, including the repair
//! re-run after a failed setup.

mod common;

use common::{harness, harness_with_rpc, Harness};
use flotilla_core::model::{TaskState, XClusterStatus};
use flotilla_core::rpc::RpcError;
use flotilla_core::testing::{MockAdminRpc, RpcCall, EXAMPLE_TABLE_IDS};
use flotilla_core::types::UniverseId;
use flotilla_engine::tasks::{TaskParams, XClusterCreateParams};
use flotilla_engine::{Commissioner, CommissionerConfig};
use std::collections::BTreeSet;
use std::sync::Arc;

fn create_params(source: UniverseId, target: UniverseId) -> TaskParams {
    TaskParams::CreateXClusterConfig(XClusterCreateParams {
        name: "repl-1".to_string(),
        source_universe: source,
        target_universe: target,
        tables: EXAMPLE_TABLE_IDS.iter().map(|t| t.to_string()).collect(),
    })
}

fn seed_pair(h: &Harness) -> (UniverseId, UniverseId) {
    (
        h.seed_universe("source-universe"),
        h.seed_universe("target-universe"),
    )
}

#[tokio::test]
async fn create_leaves_config_running() {
    let h = harness();
    let (source, target) = seed_pair(&h);

    let task_id = h.commissioner.submit(create_params(source, target)).unwrap();
    let info = h.commissioner.wait(task_id).await.unwrap();

    assert_eq!(info.state, TaskState::Success);

    let config = h.xclusters.find_by_name(source, "repl-1").unwrap();
    assert_eq!(config.status, XClusterStatus::Running);
    assert_eq!(config.tables.len(), 2);

    // One setup command, addressed by the replication group name.
    assert_eq!(
        h.rpc.calls(),
        vec![RpcCall::SetupReplication {
            group: config.replication_group_name(),
            table_count: 2,
        }]
    );

    // The lock lived on the target universe.
    let stored = h.universes.get(target).unwrap();
    assert_eq!(stored.version, 2);
    assert!(!stored.is_locked());
    assert!(stored.details.update_succeeded);
    assert_eq!(h.universes.get(source).unwrap().version, 0);
}

#[tokio::test]
async fn failed_setup_leaves_config_repairable() {
    let h = harness_with_rpc(MockAdminRpc::new().fail_setup(RpcError::Remote {
        code: 5,
        message: "table not found on target".to_string(),
    }));
    let (source, target) = seed_pair(&h);

    let task_id = h.commissioner.submit(create_params(source, target)).unwrap();
    let info = h.commissioner.wait(task_id).await.unwrap();

    assert_eq!(info.state, TaskState::Failure);
    let detail = info.failed_subtask().unwrap().error.as_ref().unwrap();
    assert_eq!(detail.code, "E401");
    assert!(detail.message.contains("table not found on target"));

    // The config survives in Failed, ready for a repair re-run.
    let config = h.xclusters.find_by_name(source, "repl-1").unwrap();
    assert_eq!(config.status, XClusterStatus::Failed);

    let stored = h.universes.get(target).unwrap();
    assert!(!stored.is_locked());
    assert!(!stored.details.update_succeeded);
}

#[tokio::test]
async fn resubmission_repairs_a_failed_config() {
    let h = harness_with_rpc(
        MockAdminRpc::new().fail_setup(RpcError::transport("connection refused")),
    );
    let (source, target) = seed_pair(&h);

    let first = h.commissioner.submit(create_params(source, target)).unwrap();
    assert_eq!(
        h.commissioner.wait(first).await.unwrap().state,
        TaskState::Failure
    );
    let failed = h.xclusters.find_by_name(source, "repl-1").unwrap();
    assert_eq!(failed.status, XClusterStatus::Failed);

    // Same stores, healthy transport this time.
    let repaired = Commissioner::new(
        Arc::clone(&h.universes),
        Arc::clone(&h.xclusters),
        Arc::new(MockAdminRpc::new()),
        CommissionerConfig::default(),
    );
    let second = repaired.submit(create_params(source, target)).unwrap();
    let info = repaired.wait(second).await.unwrap();

    assert_eq!(info.state, TaskState::Success);
    // The existing record was repaired, not replaced.
    let config = h.xclusters.find_by_name(source, "repl-1").unwrap();
    assert_eq!(config.id, failed.id);
    assert_eq!(config.status, XClusterStatus::Running);
}

#[tokio::test]
async fn duplicate_create_is_a_task_failure() {
    let h = harness();
    let (source, target) = seed_pair(&h);

    let first = h.commissioner.submit(create_params(source, target)).unwrap();
    assert_eq!(
        h.commissioner.wait(first).await.unwrap().state,
        TaskState::Success
    );

    let second = h.commissioner.submit(create_params(source, target)).unwrap();
    let info = h.commissioner.wait(second).await.unwrap();

    assert_eq!(info.state, TaskState::Failure);
    assert_eq!(info.error.unwrap().code, "E103");
    // The existing Running config is untouched.
    assert_eq!(
        h.xclusters.find_by_name(source, "repl-1").unwrap().status,
        XClusterStatus::Running
    );
    // Only the first setup went over the wire.
    assert_eq!(h.rpc.call_count(), 1);
}

#[tokio::test]
async fn self_replication_is_rejected_at_submission() {
    let h = harness();
    let universe = h.seed_universe("only-universe");

    let err = h
        .commissioner
        .submit(create_params(universe, universe))
        .unwrap_err();

    assert_eq!(err.code(), "E301");
    assert!(h.xclusters.find_by_name(universe, "repl-1").is_none());
    assert!(h.commissioner.audit_log().is_empty());
}

#[tokio::test]
async fn empty_table_set_is_rejected_at_submission() {
    let h = harness();
    let (source, target) = seed_pair(&h);

    let err = h
        .commissioner
        .submit(TaskParams::CreateXClusterConfig(XClusterCreateParams {
            name: "repl-1".to_string(),
            source_universe: source,
            target_universe: target,
            tables: BTreeSet::new(),
        }))
        .unwrap_err();

    assert_eq!(err.code(), "E301");
    assert!(err.is_validation_error());
}
