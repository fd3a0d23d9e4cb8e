//! Tear down a replication group and remove its config record.

use super::{with_deadline, Subtask, SubtaskFuture};
use crate::context::TaskContext;
use flotilla_core::error::Result;
use flotilla_core::model::XClusterStatus;
use flotilla_core::types::XClusterId;

/// Issue the replication teardown on the target cluster, then remove the
/// config record.
///
/// The record is only removed after the server confirms the teardown; a
/// rejected or unreachable call leaves the record in place, carrying the
/// server's error message verbatim in the failure detail.
pub struct TeardownReplication {
    /// The config being deleted.
    pub config: XClusterId,
}

impl Subtask for TeardownReplication {
    fn name(&self) -> String {
        format!("TeardownReplication({})", self.config)
    }

    fn validate_params(&self) -> Result<()> {
        Ok(())
    }

    fn execute<'a>(&'a self, ctx: &'a TaskContext) -> SubtaskFuture<'a> {
        Box::pin(async move {
            let config = ctx.xclusters.get(self.config)?;
            let group = config.replication_group_name();

            with_deadline(
                ctx.config.rpc_timeout,
                ctx.rpc.delete_replication(&group),
            )
            .await
            .map_err(|err| {
                tracing::error!(config = %self.config, group = %group, %err, "replication teardown failed");
                flotilla_core::error::FlotillaError::from(err)
            })?;

            ctx.xclusters.update_status(self.config, XClusterStatus::Deleted)?;
            ctx.xclusters.remove(self.config)?;
            tracing::info!(config = %self.config, group = %group, "replication torn down and config removed");
            Ok(())
        })
    }
}
