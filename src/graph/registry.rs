//! Keyed node factory
//!
//! Callers that want one node per key (or exactly one node overall) go
//! through a registry instead of creating nodes directly. Handing an
//! existing node back to the engine is safe: universe and edge additions
//! are idempotent.

use super::engine::{Graph, GraphResult};
use super::node::NodeId;
use std::collections::HashMap;
use std::hash::Hash;

/// Registry returning the same node for equal keys
///
/// `NodeRegistry<()>` holds a single node.
#[derive(Debug, Clone)]
pub struct NodeRegistry<K> {
    instances: HashMap<K, NodeId>,
}

impl<K> Default for NodeRegistry<K> {
    fn default() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq> NodeRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node registered for `key`, creating it with `init` if absent
    pub fn get_or_create<F>(&mut self, graph: &mut Graph, key: K, init: F) -> GraphResult<NodeId>
    where
        F: FnOnce(&mut Graph) -> GraphResult<NodeId>,
    {
        if let Some(&existing) = self.instances.get(&key) {
            return Ok(existing);
        }
        let node = init(graph)?;
        self.instances.insert(key, node);
        Ok(node)
    }

    pub fn get(&self, key: &K) -> Option<NodeId> {
        self.instances.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
