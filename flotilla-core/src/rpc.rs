//! Administrative RPC client adapter contract.
//!
//! The orchestrator needs exactly one thing from the managed cluster's
//! client library: issue an administrative command against a member
//! process and learn whether the server accepted it. The two failure
//! shapes are kept distinct so subtasks can tell "server said no" from
//! "could not ask":
//! - [`RpcError::Remote`]: the endpoint was reached and returned a
//!   structured error (code + message)
//! - [`RpcError::Transport`]: the endpoint could not be reached, including
//!   caller-side timeouts
//!
//! The adapter itself never retries; bounded retry policy belongs to the
//! calling subtask.

use crate::error::FlotillaError;
use crate::model::NodeHandle;
use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Error returned by an administrative RPC call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// The server processed the command and rejected it.
    #[error("remote rejected (code {code}): {message}")]
    Remote {
        /// Server-side error code.
        code: u32,
        /// Server-side error message.
        message: String,
    },

    /// The administrative endpoint could not be reached.
    #[error("transport failure: {cause}")]
    Transport {
        /// Why the endpoint could not be asked.
        cause: String,
    },
}

impl RpcError {
    /// Shorthand for a transport failure.
    pub fn transport(cause: impl Into<String>) -> Self {
        Self::Transport {
            cause: cause.into(),
        }
    }

    /// Check whether this is a transport-level failure.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<RpcError> for FlotillaError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Remote { code, message } => Self::RemoteRejected { code, message },
            RpcError::Transport { cause } => Self::TransportFailure { cause },
        }
    }
}

/// A boxed future for async RPC calls.
pub type RpcFuture<'a, T> = Pin<Box<dyn Future<Output = std::result::Result<T, RpcError>> + Send + 'a>>;

/// Capability to issue administrative commands to cluster member
/// processes.
///
/// Implementations wrap the managed database's client library; the mock
/// in [`crate::testing`] scripts outcomes for tests. Every call is
/// all-or-nothing from the orchestrator's point of view.
pub trait AdminRpc: Send + Sync {
    /// Set an in-memory runtime flag on one member process.
    ///
    /// `force` applies the flag even when it is not marked runtime-safe.
    fn set_flag<'a>(
        &'a self,
        node: &'a NodeHandle,
        flag: &'a str,
        value: &'a str,
        force: bool,
    ) -> RpcFuture<'a, ()>;

    /// Start replication for a group of tables into the target cluster.
    fn setup_replication<'a>(
        &'a self,
        group: &'a str,
        tables: &'a BTreeSet<String>,
    ) -> RpcFuture<'a, ()>;

    /// Tear down replication for a group on the target cluster.
    fn delete_replication<'a>(&'a self, group: &'a str) -> RpcFuture<'a, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_errors_map_to_distinct_kinds() {
        let remote: FlotillaError = RpcError::Remote {
            code: 3,
            message: "group not found".to_string(),
        }
        .into();
        assert_eq!(remote.code(), "E401");

        let transport: FlotillaError = RpcError::transport("connection refused").into();
        assert_eq!(transport.code(), "E402");
        assert!(transport.is_retriable());
        assert!(!remote.is_retriable());
    }
}
