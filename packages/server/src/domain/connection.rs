//! Connection identity, partitions and the registry of live connections.

use std::{collections::HashMap, fmt};

use serde::Serialize;
use uuid::Uuid;

/// Opaque per-connection identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// The two disjoint connection classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// Read-mostly renderers captured by the streaming tool.
    Overlays,
    /// Operator dashboards allowed to mutate widget state.
    Controllers,
}

impl Partition {
    /// Classify an upgrade request by its request target (path and query).
    ///
    /// Any target containing `control` (case-sensitive) is a controller, so
    /// `/overlay-control-room` is one too. This is a plain substring test, not
    /// a route match.
    pub fn classify(request_target: &str) -> Self {
        if request_target.contains("control") {
            Partition::Controllers
        } else {
            Partition::Overlays
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Overlays => "overlay",
            Partition::Controllers => "controller",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two keyed sets of live connections.
///
/// `T` is whatever handle the transport uses to reach a connection.
#[derive(Debug)]
pub struct ConnectionRegistry<T> {
    overlays: HashMap<ConnectionId, T>,
    controllers: HashMap<ConnectionId, T>,
}

impl<T> Default for ConnectionRegistry<T> {
    fn default() -> Self {
        Self {
            overlays: HashMap::new(),
            controllers: HashMap::new(),
        }
    }
}

impl<T> ConnectionRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition(&self, partition: Partition) -> &HashMap<ConnectionId, T> {
        match partition {
            Partition::Overlays => &self.overlays,
            Partition::Controllers => &self.controllers,
        }
    }

    fn partition_mut(&mut self, partition: Partition) -> &mut HashMap<ConnectionId, T> {
        match partition {
            Partition::Overlays => &mut self.overlays,
            Partition::Controllers => &mut self.controllers,
        }
    }

    /// Insert a connection. Re-inserting the same id replaces its handle.
    pub fn add(&mut self, partition: Partition, id: ConnectionId, handle: T) {
        self.partition_mut(partition).insert(id, handle);
    }

    /// Remove a connection; returns its handle if it was present.
    pub fn remove(&mut self, partition: Partition, id: &ConnectionId) -> Option<T> {
        self.partition_mut(partition).remove(id)
    }

    pub fn size_of(&self, partition: Partition) -> usize {
        self.partition(partition).len()
    }

    /// Look a connection up in either partition.
    pub fn get(&self, id: &ConnectionId) -> Option<&T> {
        self.overlays.get(id).or_else(|| self.controllers.get(id))
    }

    pub fn iter(&self, partition: Partition) -> impl Iterator<Item = (&ConnectionId, &T)> {
        self.partition(partition).iter()
    }

    /// Empty both partitions, returning how many connections were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.overlays.len() + self.controllers.len();
        self.overlays.clear();
        self.controllers.clear();
        dropped
    }
}
