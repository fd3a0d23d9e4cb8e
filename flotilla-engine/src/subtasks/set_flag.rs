//! Set in-memory runtime flags on one cluster member process.

use super::{with_deadline, with_transport_retries, Subtask, SubtaskFuture};
use crate::context::TaskContext;
use flotilla_core::error::{FlotillaError, Result};
use flotilla_core::model::NodeDetails;
use std::collections::BTreeMap;

/// Apply a batch of in-memory flags to one node, in flag order.
///
/// Flags are applied one call at a time; the first rejected flag stops
/// the batch (and with it the owning task), so later flags in the batch
/// are never issued. Transport failures are retried within the engine's
/// bounded retry policy; rejections are final.
pub struct SetFlagInMemory {
    /// The node whose process is updated.
    pub node: NodeDetails,
    /// Flag name/value pairs, applied in key order.
    pub flags: BTreeMap<String, String>,
    /// Apply flags not marked runtime-safe.
    pub force: bool,
}

impl Subtask for SetFlagInMemory {
    fn name(&self) -> String {
        format!("SetFlagInMemory({})", self.node.name)
    }

    fn validate_params(&self) -> Result<()> {
        if self.flags.is_empty() {
            return Err(FlotillaError::InvalidParams {
                operation: self.name(),
                cause: "flag map cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    fn execute<'a>(&'a self, ctx: &'a TaskContext) -> SubtaskFuture<'a> {
        Box::pin(async move {
            for (flag, value) in &self.flags {
                with_transport_retries(ctx.config.rpc_attempts, || {
                    with_deadline(
                        ctx.config.rpc_timeout,
                        ctx.rpc.set_flag(&self.node.admin, flag, value, self.force),
                    )
                })
                .await
                .map_err(|err| {
                    tracing::error!(
                        node = %self.node.name,
                        flag = %flag,
                        %err,
                        "failed to set runtime flag"
                    );
                    FlotillaError::from(err)
                })?;
                tracing::debug!(node = %self.node.name, flag = %flag, "runtime flag set");
            }
            Ok(())
        })
    }
}
