//! Start replication for a config on the target cluster.

use super::{with_deadline, Subtask, SubtaskFuture};
use crate::context::TaskContext;
use flotilla_core::error::Result;
use flotilla_core::model::XClusterStatus;
use flotilla_core::types::XClusterId;

/// Issue the replication setup on the target cluster and confirm the
/// config as `Running`.
///
/// Works both for a fresh `Init` config and for repairing a `Failed` one;
/// the lifecycle permits either move to `Running`.
pub struct SetupReplication {
    /// The config being set up.
    pub config: XClusterId,
}

impl Subtask for SetupReplication {
    fn name(&self) -> String {
        format!("SetupReplication({})", self.config)
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
                ctx.rpc.setup_replication(&group, &config.tables),
            )
            .await
            .map_err(|err| {
                tracing::error!(config = %self.config, group = %group, %err, "replication setup failed");
                flotilla_core::error::FlotillaError::from(err)
            })?;

            ctx.xclusters.update_status(self.config, XClusterStatus::Running)?;
            tracing::info!(config = %self.config, group = %group, "replication running");
            Ok(())
        })
    }
}
