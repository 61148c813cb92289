//! Per-node memoization of neighbor resolution

use super::node::NodeId;
use crate::query::{Direction, UnknownEdgePolicy};
use std::collections::HashMap;

/// Exact argument tuple of a neighbor resolution call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub direction: Direction,
    pub unknown_edges: UnknownEdgePolicy,
    /// Identity of the filter predicate, if any
    pub filter: Option<u64>,
}

/// Diagnostic counters. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub insertions: u64,
}

impl std::ops::AddAssign for CacheStats {
    fn add_assign(&mut self, rhs: Self) {
        self.hits += rhs.hits;
        self.misses += rhs.misses;
        self.invalidations += rhs.invalidations;
        self.insertions += rhs.insertions;
    }
}

#[derive(Debug, Default)]
pub(crate) struct NeighborCache {
    entries: HashMap<CacheKey, Vec<NodeId>>,
    stats: CacheStats,
}

impl NeighborCache {
    pub(crate) fn get(&mut self, key: &CacheKey) -> Option<Vec<NodeId>> {
        match self.entries.get(key) {
            Some(answer) => {
                self.stats.hits += 1;
                Some(answer.clone())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub(crate) fn insert(&mut self, key: CacheKey, answer: Vec<NodeId>) {
        self.stats.insertions += 1;
        self.entries.insert(key, answer);
    }

    /// Drop every entry; only a cache that held answers counts an invalidation
    pub(crate) fn invalidate(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.stats.invalidations += 1;
        self.entries.clear();
    }

    /// Drop every entry without counting an invalidation
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// Graph-wide summary of cache activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheReport {
    pub enabled: bool,
    /// Number of nodes tracked
    pub nodes: usize,
    /// Cached answers currently held
    pub entries: usize,
    pub totals: CacheStats,
}

impl std::fmt::Display for CacheReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.enabled {
            return write!(f, "Neighbor caching is DISABLED");
        }
        writeln!(f, "=== CACHE STATISTICS OVERALL ===")?;
        writeln!(f, "Size:          {}", self.nodes)?;
        writeln!(f, "Entries:       {}", self.entries)?;
        writeln!(f, "Hits:          {}", self.totals.hits)?;
        writeln!(f, "Misses:        {}", self.totals.misses)?;
        writeln!(f, "Invalidations: {}", self.totals.invalidations)?;
        write!(f, "Insertions:    {}", self.totals.insertions)
    }
}
