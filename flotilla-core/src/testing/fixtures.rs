//! Entity fixtures for tests.

use crate::model::{
    Cluster, ClusterType, NodeDetails, NodeHandle, Universe, UniverseDetails, UserIntent,
    XClusterConfig, XClusterStatus,
};
use crate::types::UniverseId;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Table identifiers used by the replication fixtures.
pub const EXAMPLE_TABLE_IDS: [&str; 2] = [
    "000030af000030008000000000004000",
    "000030af000030008000000000004001",
];

/// Build a three-node single-region universe at version 0.
pub fn test_universe(name: &str) -> Universe {
    let nodes = (1..=3)
        .map(|i| NodeDetails {
            name: format!("n{i}"),
            admin: NodeHandle::new(format!("10.0.0.{i}"), 9100),
            provider: "aws".to_string(),
            region: "us-west-2".to_string(),
            instance_type: "c5.large".to_string(),
            is_master: i == 1,
            is_tserver: true,
        })
        .collect();

    let details = UniverseDetails {
        nodes,
        clusters: vec![Cluster {
            uuid: Uuid::new_v4(),
            cluster_type: ClusterType::Primary,
            user_intent: UserIntent {
                provider: "aws".to_string(),
                regions: vec!["us-west-2".to_string()],
                instance_type: "c5.large".to_string(),
                num_nodes: 3,
                replication_factor: 3,
            },
        }],
        ..UniverseDetails::default()
    };

    Universe::new(UniverseId::new(), name, details)
}

/// Build a replication config over [`EXAMPLE_TABLE_IDS`].
pub fn test_xcluster(
    name: &str,
    source: UniverseId,
    target: UniverseId,
    status: XClusterStatus,
) -> XClusterConfig {
    let tables: BTreeSet<String> = EXAMPLE_TABLE_IDS.iter().map(|t| t.to_string()).collect();
    XClusterConfig::new(name, source, target, tables, status)
}
