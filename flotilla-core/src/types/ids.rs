//! Strongly-typed identifiers for Flotilla entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Parse an identifier from a UUID string.
            ///
            /// Returns `None` if the string is not a valid UUID.
            pub fn parse(s: &str) -> Option<Self> {
                Uuid::parse_str(s).ok().map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a universe (a managed cluster descriptor).
    ///
    /// A universe is the unit of mutual exclusion: at most one mutating
    /// task may hold its lock at any time.
    UniverseId,
    "universe_"
);

entity_id!(
    /// Unique identifier for a submitted orchestration task.
    TaskId,
    "task_"
);

entity_id!(
    /// Unique identifier for a cross-cluster replication config.
    XClusterId,
    "xcluster_"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(UniverseId::new(), UniverseId::new());
        assert_ne!(TaskId::new(), TaskId::new());
    }

    #[test]
    fn display_carries_prefix_and_uuid() {
        let uuid = Uuid::new_v4();
        let id = UniverseId::from_uuid(uuid);
        let rendered = id.to_string();
        assert!(rendered.starts_with("universe_"));
        assert!(rendered.contains(&uuid.to_string()));
    }

    #[test]
    fn parse_round_trip() {
        let id = XClusterId::new();
        let parsed = XClusterId::parse(&id.as_uuid().to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(XClusterId::parse("not-a-uuid").is_none());
    }

    #[test]
    fn serde_is_transparent() {
        let id = TaskId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
