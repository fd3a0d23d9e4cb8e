//! Shared harness for engine integration tests.

#![allow(dead_code)]

use flotilla_core::store::{UniverseStore, XClusterStore};
use flotilla_core::testing::MockAdminRpc;
use flotilla_core::types::UniverseId;
use flotilla_engine::{Commissioner, CommissionerConfig};
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A commissioner wired to in-memory stores and a scripted RPC mock.
pub struct Harness {
    pub commissioner: Commissioner,
    pub universes: Arc<UniverseStore>,
    pub xclusters: Arc<XClusterStore>,
    pub rpc: Arc<MockAdminRpc>,
}

/// Build a harness around the given RPC mock.
pub fn harness_with_rpc(rpc: MockAdminRpc) -> Harness {
    init_tracing();
    let universes = Arc::new(UniverseStore::new());
    let xclusters = Arc::new(XClusterStore::new());
    let rpc = Arc::new(rpc);
    let commissioner = Commissioner::new(
        Arc::clone(&universes),
        Arc::clone(&xclusters),
        rpc.clone(),
        CommissionerConfig::default(),
    );
    Harness {
        commissioner,
        universes,
        xclusters,
        rpc,
    }
}

/// Build a harness where every RPC succeeds.
pub fn harness() -> Harness {
    harness_with_rpc(MockAdminRpc::new())
}

impl Harness {
    /// Seed a universe and return its id.
    pub fn seed_universe(&self, name: &str) -> UniverseId {
        let universe = flotilla_core::testing::test_universe(name);
        let id = universe.id;
        self.universes.create(universe).unwrap();
        id
    }
}
