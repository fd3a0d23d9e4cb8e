//! Update a universe's node-to-node certificate reference.

use super::{Subtask, SubtaskFuture};
use crate::context::TaskContext;
use flotilla_core::error::{FlotillaError, Result};
use flotilla_core::types::UniverseId;
use uuid::Uuid;

/// Rewrite `root_ca` on the universe descriptor.
///
/// The write goes through the versioned updater and refuses to run when
/// the universe is not inside an edit window, so a certificate can never
/// be swapped under a universe that no task is editing.
pub struct SetCertificate {
    /// The universe whose certificate reference is updated.
    pub universe: UniverseId,
    /// The new certificate.
    pub cert: Uuid,
}

impl Subtask for SetCertificate {
    fn name(&self) -> String {
        format!("SetCertificate({})", self.universe)
    }

    fn validate_params(&self) -> Result<()> {
        Ok(())
    }

    fn execute<'a>(&'a self, ctx: &'a TaskContext) -> SubtaskFuture<'a> {
        Box::pin(async move {
            ctx.universes.update_and_save(self.universe, |u| {
                if !u.details.update_in_progress {
                    return Err(FlotillaError::NotBeingEdited { universe: u.id });
                }
                u.details.root_ca = Some(self.cert);
                Ok(())
            })?;
            tracing::info!(universe = %self.universe, cert = %self.cert, "certificate reference updated");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommissionerConfig;
    use flotilla_core::store::{UniverseStore, XClusterStore};
    use flotilla_core::testing::{test_universe, MockAdminRpc};
    use std::sync::Arc;

    fn ctx() -> TaskContext {
        TaskContext::new(
            Arc::new(UniverseStore::new()),
            Arc::new(XClusterStore::new()),
            Arc::new(MockAdminRpc::new()),
            CommissionerConfig::default(),
        )
    }

    #[tokio::test]
    async fn refuses_to_run_outside_edit_window() {
        let ctx = ctx();
        let universe = test_universe("cert-test");
        let id = universe.id;
        ctx.universes.create(universe).unwrap();

        let subtask = SetCertificate {
            universe: id,
            cert: Uuid::new_v4(),
        };
        let err = subtask.execute(&ctx).await.unwrap_err();
        assert_eq!(err.code(), "E202");

        // Nothing applied, version untouched.
        let stored = ctx.universes.get(id).unwrap();
        assert_eq!(stored.version, 0);
        assert!(stored.details.root_ca.is_none());
    }

    #[tokio::test]
    async fn rewrites_root_ca_inside_edit_window() {
        let ctx = ctx();
        let universe = test_universe("cert-test");
        let id = universe.id;
        ctx.universes.create(universe).unwrap();
        ctx.universes.acquire_lock(id).unwrap();

        let cert = Uuid::new_v4();
        SetCertificate { universe: id, cert }
            .execute(&ctx)
            .await
            .unwrap();

        let stored = ctx.universes.get(id).unwrap();
        assert_eq!(stored.details.root_ca, Some(cert));
        assert_eq!(stored.version, 2); // lock acquire + certificate write
    }
}
