//! Integration tests for the universe lock discipline.

mod common;

use common::harness;
use flotilla_core::model::TaskState;
use flotilla_engine::tasks::{ServerType, SetFlagsParams, TaskParams};
use std::collections::BTreeMap;

fn flags_params(universe: flotilla_core::types::UniverseId) -> TaskParams {
    TaskParams::SetRuntimeFlags(SetFlagsParams {
        universe,
        server_type: ServerType::Tserver,
        flags: BTreeMap::from([(
            "max_clock_skew_usec".to_string(),
            "400000".to_string(),
        )]),
        force: false,
    })
}

#[tokio::test]
async fn task_against_locked_universe_fails_fast() {
    let h = harness();
    let universe = h.seed_universe("locked-universe");

    // Another task is mid-flight: the lock is held.
    h.universes.acquire_lock(universe).unwrap();

    let task_id = h.commissioner.submit(flags_params(universe)).unwrap();
    let info = h.commissioner.wait(task_id).await.unwrap();

    assert_eq!(info.state, TaskState::Failure);
    assert_eq!(info.error.unwrap().code, "E201");
    // No subtasks were even planned.
    assert!(info.subtasks.is_empty());
    // Zero mutations: only the original acquire is on the version.
    let stored = h.universes.get(universe).unwrap();
    assert_eq!(stored.version, 1);
    assert!(stored.is_locked());
    assert!(stored.details.update_in_progress);
    assert_eq!(h.rpc.call_count(), 0);
}

#[tokio::test]
async fn force_unlock_is_an_explicit_operator_action() {
    let h = harness();
    let universe = h.seed_universe("stale-lock");
    h.universes.acquire_lock(universe).unwrap();

    let released = h.commissioner.force_unlock(universe).unwrap();
    assert!(!released.is_locked());
    assert!(!released.details.update_in_progress);
    assert!(!released.details.update_succeeded);
    assert_eq!(released.version, 2);

    // The universe is usable again.
    let task_id = h.commissioner.submit(flags_params(universe)).unwrap();
    let info = h.commissioner.wait(task_id).await.unwrap();
    assert_eq!(info.state, TaskState::Success);
}

#[tokio::test]
async fn force_unlock_of_unlocked_universe_is_rejected() {
    let h = harness();
    let universe = h.seed_universe("not-locked");
    let err = h.commissioner.force_unlock(universe).unwrap_err();
    assert_eq!(err.code(), "E203");
    assert_eq!(h.universes.get(universe).unwrap().version, 0);
}

#[tokio::test]
async fn tasks_on_different_universes_run_concurrently() {
    let h = harness();
    let u1 = h.seed_universe("universe-a");
    let u2 = h.seed_universe("universe-b");

    let t1 = h.commissioner.submit(flags_params(u1)).unwrap();
    let t2 = h.commissioner.submit(flags_params(u2)).unwrap();

    assert_eq!(
        h.commissioner.wait(t1).await.unwrap().state,
        TaskState::Success
    );
    assert_eq!(
        h.commissioner.wait(t2).await.unwrap().state,
        TaskState::Success
    );

    for id in [u1, u2] {
        let stored = h.universes.get(id).unwrap();
        assert!(!stored.is_locked());
        assert!(stored.details.update_succeeded);
        assert_eq!(stored.version, 2);
    }
}

#[tokio::test]
async fn invalid_params_are_rejected_before_any_side_effect() {
    let h = harness();
    let universe = h.seed_universe("validated");

    let err = h
        .commissioner
        .submit(TaskParams::SetRuntimeFlags(SetFlagsParams {
            universe,
            server_type: ServerType::Tserver,
            flags: BTreeMap::new(),
            force: false,
        }))
        .unwrap_err();

    assert_eq!(err.code(), "E301");
    assert!(err.is_validation_error());
    assert_eq!(h.universes.get(universe).unwrap().version, 0);
    assert!(h.commissioner.audit_log().is_empty());
}

#[tokio::test]
async fn unknown_task_id_has_no_status() {
    let h = harness();
    let err = h
        .commissioner
        .status(flotilla_core::types::TaskId::new())
        .unwrap_err();
    assert_eq!(err.code(), "E105");
}
