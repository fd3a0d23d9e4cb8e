//! Scripted administrative RPC mock.

use crate::model::NodeHandle;
use crate::rpc::{AdminRpc, RpcError, RpcFuture};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};

/// One recorded administrative call, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcCall {
    /// A `set_flag` call.
    SetFlag {
        /// Target node, rendered as host:port.
        node: String,
        /// Flag name.
        flag: String,
        /// Flag value.
        value: String,
        /// Force application of non-runtime-safe flags.
        force: bool,
    },
    /// A `setup_replication` call.
    SetupReplication {
        /// Replication group name.
        group: String,
        /// Number of tables in the group.
        table_count: usize,
    },
    /// A `delete_replication` call.
    DeleteReplication {
        /// Replication group name.
        group: String,
    },
}

/// An [`AdminRpc`] with scripted outcomes.
///
/// Every command succeeds unless a failure has been scripted for it.
/// All calls are recorded, so tests can assert both outcomes and the
/// exact order in which commands were issued.
#[derive(Debug, Default)]
pub struct MockAdminRpc {
    calls: Mutex<Vec<RpcCall>>,
    flag_failures: Mutex<HashMap<String, RpcError>>,
    setup_failure: Mutex<Option<RpcError>>,
    delete_failure: Mutex<Option<RpcError>>,
}

impl MockAdminRpc {
    /// Create a mock where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a failure for one flag name.
    #[must_use]
    pub fn fail_flag(self, flag: impl Into<String>, err: RpcError) -> Self {
        self.flag_failures.lock().insert(flag.into(), err);
        self
    }

    /// Script a failure for `setup_replication`.
    #[must_use]
    pub fn fail_setup(self, err: RpcError) -> Self {
        *self.setup_failure.lock() = Some(err);
        self
    }

    /// Script a failure for `delete_replication`.
    #[must_use]
    pub fn fail_delete(self, err: RpcError) -> Self {
        *self.delete_failure.lock() = Some(err);
        self
    }

    /// Snapshot of all recorded calls, in issue order.
    pub fn calls(&self) -> Vec<RpcCall> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl AdminRpc for MockAdminRpc {
    fn set_flag<'a>(
        &'a self,
        node: &'a NodeHandle,
        flag: &'a str,
        value: &'a str,
        force: bool,
    ) -> RpcFuture<'a, ()> {
        Box::pin(async move {
            self.calls.lock().push(RpcCall::SetFlag {
                node: node.to_string(),
                flag: flag.to_string(),
                value: value.to_string(),
                force,
            });
            match self.flag_failures.lock().get(flag) {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        })
    }

    fn setup_replication<'a>(
        &'a self,
        group: &'a str,
        tables: &'a BTreeSet<String>,
    ) -> RpcFuture<'a, ()> {
        Box::pin(async move {
            self.calls.lock().push(RpcCall::SetupReplication {
                group: group.to_string(),
                table_count: tables.len(),
            });
            match self.setup_failure.lock().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
    }

    fn delete_replication<'a>(&'a self, group: &'a str) -> RpcFuture<'a, ()> {
        Box::pin(async move {
            self.calls.lock().push(RpcCall::DeleteReplication {
                group: group.to_string(),
            });
            match self.delete_failure.lock().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let rpc = MockAdminRpc::new();
        let node = NodeHandle::new("10.0.0.1", 9100);

        rpc.set_flag(&node, "max_clock_skew_usec", "400000", false)
            .await
            .unwrap();
        rpc.delete_replication("group-1").await.unwrap();

        let calls = rpc.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], RpcCall::SetFlag { flag, .. } if flag == "max_clock_skew_usec"));
        assert!(matches!(&calls[1], RpcCall::DeleteReplication { group } if group == "group-1"));
    }

    #[tokio::test]
    async fn scripted_failures_surface() {
        let rpc = MockAdminRpc::new()
            .fail_flag(
                "bad_flag",
                RpcError::Remote {
                    code: 9,
                    message: "unknown flag".to_string(),
                },
            )
            .fail_delete(RpcError::transport("connection reset"));
        let node = NodeHandle::new("10.0.0.1", 9100);

        let err = rpc.set_flag(&node, "bad_flag", "1", false).await.unwrap_err();
        assert!(matches!(err, RpcError::Remote { code: 9, .. }));

        let err = rpc.delete_replication("group-1").await.unwrap_err();
        assert!(err.is_transport());
    }
}
