//! Graph session configuration

use crate::graph::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Behavior switches held by a [`Graph`](crate::Graph) for its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Memoize neighbor resolution per node
    pub neighbor_caching: bool,
    /// Removing an absent membership raises instead of doing nothing
    pub strict_membership: bool,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_neighbor_caching(mut self, enabled: bool) -> Self {
        self.neighbor_caching = enabled;
        self
    }

    pub fn with_strict_membership(mut self, strict: bool) -> Self {
        self.strict_membership = strict;
        self
    }

    /// Parse a YAML document; missing keys take their defaults
    pub fn from_yaml_str(source: &str) -> GraphResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a YAML config file
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(GraphError::Io)?;
        let config = Self::from_yaml_str(&source)?;
        tracing::debug!(path = %path.display(), ?config, "loaded graph config");
        Ok(config)
    }
}
